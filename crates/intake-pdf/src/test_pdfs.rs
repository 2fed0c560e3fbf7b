//! Synthetic PDF builders for intake tests.

use lopdf::{content::Content, content::Operation, Dictionary, Document, Object, Stream};

/// Kind of page to synthesize.
pub enum PageSpec {
    /// A page with a text run drawn with a standard Helvetica font.
    Text(&'static str),
    /// A page whose only content is a raster image XObject.
    Image,
    /// A page with no content stream operations and no resources.
    Blank,
}

/// Build an in-memory PDF with one page per spec.
pub fn build_pdf(pages: &[PageSpec]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Font".to_vec())),
        ("Subtype", Object::Name(b"Type1".to_vec())),
        ("BaseFont", Object::Name(b"Helvetica".to_vec())),
    ]));

    let mut page_ids = Vec::new();

    for spec in pages {
        let (operations, resources) = match spec {
            PageSpec::Text(text) => {
                let content = Content {
                    operations: vec![
                        Operation::new("BT", vec![]),
                        Operation::new(
                            "Tf",
                            vec![Object::Name(b"F1".to_vec()), Object::Integer(12)],
                        ),
                        Operation::new("Td", vec![Object::Integer(100), Object::Integer(700)]),
                        Operation::new(
                            "Tj",
                            vec![Object::String(
                                text.as_bytes().to_vec(),
                                lopdf::StringFormat::Literal,
                            )],
                        ),
                        Operation::new("ET", vec![]),
                    ],
                };
                let mut fonts = Dictionary::new();
                fonts.set("F1", Object::Reference(font_id));
                let mut resources = Dictionary::new();
                resources.set("Font", Object::Dictionary(fonts));
                (content, Some(resources))
            }
            PageSpec::Image => {
                let mut image_dict = Dictionary::new();
                image_dict.set("Type", Object::Name(b"XObject".to_vec()));
                image_dict.set("Subtype", Object::Name(b"Image".to_vec()));
                image_dict.set("Width", Object::Integer(8));
                image_dict.set("Height", Object::Integer(8));
                image_dict.set("ColorSpace", Object::Name(b"DeviceGray".to_vec()));
                image_dict.set("BitsPerComponent", Object::Integer(8));
                let image_id = doc.add_object(Stream::new(image_dict, vec![0u8; 64]));

                let content = Content {
                    operations: vec![
                        Operation::new("q", vec![]),
                        Operation::new(
                            "cm",
                            vec![
                                Object::Integer(612),
                                Object::Integer(0),
                                Object::Integer(0),
                                Object::Integer(792),
                                Object::Integer(0),
                                Object::Integer(0),
                            ],
                        ),
                        Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                        Operation::new("Q", vec![]),
                    ],
                };
                let mut xobjects = Dictionary::new();
                xobjects.set("Im0", Object::Reference(image_id));
                let mut resources = Dictionary::new();
                resources.set("XObject", Object::Dictionary(xobjects));
                (content, Some(resources))
            }
            PageSpec::Blank => (Content { operations: vec![] }, None),
        };

        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            operations.encode().unwrap(),
        ));

        let mut page = Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(612),
                    Object::Integer(792),
                ]),
            ),
            ("Contents", Object::Reference(content_id)),
        ]);
        if let Some(resources) = resources {
            page.set("Resources", Object::Dictionary(resources));
        }
        page_ids.push(doc.add_object(page));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Count", Object::Integer(pages.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}
