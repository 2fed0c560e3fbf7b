//! Per-page layout analysis.
//!
//! Decides, for a single parsed page, whether the page carries a usable text
//! layer or is dominated by raster images. Pure function of page content; no
//! side effects.

use lopdf::{Document, Object, ObjectId};

/// Per-page layout signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSignal {
    /// The page has extractable non-whitespace text.
    TextDominant,
    /// No usable text, but at least one embedded raster image.
    ImageDominant,
    /// Neither condition clearly holds (no text and no images, or the page
    /// failed to parse).
    Ambiguous,
}

/// Analyze a single page of an already-parsed document.
///
/// `page_number` is the 1-indexed page number as reported by
/// [`Document::get_pages`]; `page_id` is the corresponding page object id.
pub fn analyze_page(doc: &Document, page_number: u32, page_id: ObjectId) -> PageSignal {
    let text = doc.extract_text(&[page_number]).ok();
    let has_text = text
        .as_deref()
        .map(|t| !t.trim().is_empty())
        .unwrap_or(false);

    if has_text {
        return PageSignal::TextDominant;
    }

    if count_page_images(doc, page_id) > 0 {
        PageSignal::ImageDominant
    } else {
        PageSignal::Ambiguous
    }
}

/// Count raster image XObjects reachable from the page's resource
/// dictionaries. Form XObjects and other non-image resources are ignored.
pub fn count_page_images(doc: &Document, page_id: ObjectId) -> usize {
    let (direct, referenced) = doc.get_page_resources(page_id);

    let mut resource_dicts = Vec::new();
    if let Some(dict) = direct {
        resource_dicts.push(dict);
    }
    for id in referenced {
        if let Ok(dict) = doc.get_object(id).and_then(Object::as_dict) {
            resource_dicts.push(dict);
        }
    }

    let mut count = 0;
    for resources in resource_dicts {
        let xobjects = match resources.get(b"XObject").and_then(Object::as_dict) {
            Ok(dict) => dict,
            Err(_) => continue,
        };

        for (_name, entry) in xobjects.iter() {
            let object = match entry {
                Object::Reference(id) => match doc.get_object(*id) {
                    Ok(object) => object,
                    Err(_) => continue,
                },
                other => other,
            };

            if let Ok(stream) = object.as_stream() {
                let is_image = stream
                    .dict
                    .get(b"Subtype")
                    .and_then(Object::as_name_str)
                    .map(|name| name == "Image")
                    .unwrap_or(false);
                if is_image {
                    count += 1;
                }
            }
        }
    }

    count
}
