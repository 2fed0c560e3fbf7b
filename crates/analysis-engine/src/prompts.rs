//! Analysis dispatch table.
//!
//! Maps each [`DocumentClass`] to its (system prompt, user-prompt builder)
//! pair. The six categories share one response envelope shape; they differ
//! only in the field vocabulary to extract and the named validation checks.
//! Routing is a total function on the enum: every class has exactly one
//! entry, and the same class always selects the same entry.

use chrono::NaiveDate;
use shared_types::DocumentClass;

use crate::rules::validation_checks;

/// One prompt pair ready to send to the Text Analysis Service. Constructed
/// after classification, consumed exactly once by the analysis call.
#[derive(Debug)]
pub struct AnalysisRequest {
    pub class: DocumentClass,
    pub system: &'static str,
    pub user: String,
}

/// A dispatch-table entry.
pub struct PromptTemplate {
    pub system: &'static str,
    pub build_user: fn(&str, NaiveDate) -> String,
}

/// Select the template for a class. Total: every class id validated at
/// classification time routes here without a fallible lookup.
pub fn template_for(class: DocumentClass) -> &'static PromptTemplate {
    match class {
        DocumentClass::Identity => &IDENTITY,
        DocumentClass::AddressProof => &ADDRESS_PROOF,
        DocumentClass::Registration => &REGISTRATION,
        DocumentClass::Ownership => &OWNERSHIP,
        DocumentClass::TaxReturn => &TAX_RETURN,
        DocumentClass::Financial => &FINANCIAL,
    }
}

/// Build the analysis request for a classified document.
pub fn build_request(class: DocumentClass, text: &str, as_of: NaiveDate) -> AnalysisRequest {
    let template = template_for(class);
    AnalysisRequest {
        class,
        system: template.system,
        user: (template.build_user)(text, as_of),
    }
}

static IDENTITY: PromptTemplate = PromptTemplate {
    system: "You are a specialized AI assistant focused on analyzing identity documents such as \
             passports, driving licenses, voter IDs, and residence permits. Your primary purpose \
             is to help users understand and analyze identity documents while maintaining \
             confidentiality and accuracy. Provide structured, actionable insights.",
    build_user: user_prompt_identity,
};

static ADDRESS_PROOF: PromptTemplate = PromptTemplate {
    system: "You are a specialized AI assistant focused on analyzing proof of address documents \
             such as lease or rental agreements, utility records, proof of tax paid, and voting \
             records. Your primary purpose is to help users understand and analyze proof of \
             address documents while maintaining confidentiality and accuracy. Provide \
             structured, actionable insights.",
    build_user: user_prompt_address_proof,
};

static REGISTRATION: PromptTemplate = PromptTemplate {
    system: "You are a specialized AI assistant focused on analyzing company registration \
             documents and reporting the company details they contain. Your primary purpose is \
             to help users understand and analyze corporate documents while maintaining \
             confidentiality and accuracy. Provide structured, actionable insights.",
    build_user: user_prompt_registration,
};

static OWNERSHIP: PromptTemplate = PromptTemplate {
    system: "You are a specialized AI assistant focused on analyzing company ownership \
             structures, corporate documents, and organizational hierarchies. Your primary \
             purpose is to help users understand and analyze corporate documents while \
             maintaining confidentiality and accuracy. Provide structured, actionable insights.",
    build_user: user_prompt_ownership,
};

static TAX_RETURN: PromptTemplate = PromptTemplate {
    system: "You are a specialized AI assistant focused on analyzing tax return documents and \
             providing tax-related information. Your primary purpose is to help users \
             understand, extract, and analyze information from tax documents while maintaining \
             strict confidentiality and accuracy. Provide structured, actionable insights.",
    build_user: user_prompt_tax_return,
};

static FINANCIAL: PromptTemplate = PromptTemplate {
    system: "You are an expert financial analyst with exceptional attention to detail. Your \
             task is to perform a comprehensive analysis of financial documents and provide \
             structured JSON output. Do not include any extra text at the beginning or the end \
             of the JSON. Strictly follow the JSON format provided.",
    build_user: user_prompt_financial,
};

fn user_prompt_identity(text: &str, as_of: NaiveDate) -> String {
    let today = as_of.format("%Y-%m-%d");
    let format_block = response_format_block(validation_checks(DocumentClass::Identity));
    format!(
        "Perform a comprehensive analysis of the following proof of identity document:\n\n\
         DOCUMENT TEXT:\n{text}\n\n\
         COMPREHENSIVE ANALYSIS REQUIREMENTS:\n\
         1. Identify key identity verification metrics and their significance\n\
         2. Highlight potential risks or verification concerns\n\
         3. Compare document authenticity against standard requirements\n\
         4. Provide a clear, concise summary with actionable insights\n\
         5. Extract the following details from the document if present, else print NULL\n\
            - language : Language of the document\n\
            - document_id : Document id mentioned in the document\n\
            - nationality : Country of citizenship\n\
            - name : Full legal name\n\
            - identity_number : {{\n\
                \"passport_number\": \"Passport number if passport\",\n\
                \"driving_license_number\": \"License number if driving license\"\n\
            }}\n\
            - document_type : \"Passport/Driving License\"\n\
            - issue_date : Date of document issuance\n\
            - expiry_date : Document expiration date\n\
            - issuing_authority : Authority that issued the document\n\
            - issuing_country : Country that issued the document\n\
            - document_status : Valid/Expired/Suspended\n\
            - date_of_birth : Date of birth of the individual\n\
            {RISK_FIELDS}\n\
         6. Validate the extracted entities with the rules given below\n\
            - language : TRUE for the English language only; FALSE for all other languages\n\
            - age_check : Compare expiry_date with {today}. If the difference between {today} \
              and expiry_date is 3 months or less then TRUE, else FALSE\n\
            - document_validity : The document must not be expired. TRUE if valid, else FALSE\n\
            - id_format : Must match the standard passport/license format of the issuing \
              country. TRUE if valid, else FALSE\n\
            - nationality_check : Must be a recognized sovereign nation. TRUE if valid, else \
              FALSE\n\
         7. For each extracted field, provide a confidence score which is the average \
            probability score of the tokens involved\n\n\
         {format_block}"
    )
}

fn user_prompt_address_proof(text: &str, as_of: NaiveDate) -> String {
    let today = as_of.format("%Y-%m-%d");
    let format_block = response_format_block(validation_checks(DocumentClass::AddressProof));
    format!(
        "Perform a comprehensive analysis of the following proof of address document:\n\n\
         DOCUMENT TEXT:\n{text}\n\n\
         COMPREHENSIVE ANALYSIS REQUIREMENTS:\n\
         1. Identify key identity verification metrics and their significance\n\
         2. Highlight potential risks or verification concerns\n\
         3. Compare document authenticity against standard requirements\n\
         4. Provide a clear, concise summary with actionable insights\n\
         5. Extract the following details from the document if present, else print NULL\n\
            - language : Language of the document\n\
            - document_id : Document id mentioned in the document\n\
            - nationality : Country of citizenship\n\
            - address : Current residential address\n\
            - name : Full legal name\n\
            - document_type : Type of identity document\n\
            - document_number : Identity document number\n\
            - issue_date : Date of document issuance\n\
            - expiry_date : Document expiration date\n\
            - issuing_authority : Authority that issued the document\n\
            - date_of_birth : Date of birth of the individual\n\
            - gender : Gender as stated in the document\n\
            - place_of_birth : Place of birth\n\
            - document_status : Valid/Expired/Suspended\n\
            {RISK_FIELDS}\n\
         6. Validate the extracted entities with the rules given below\n\
            - language : TRUE for the English language only; FALSE for all other languages\n\
            - age_check : Compare expiry_date with {today}. If the difference between {today} \
              and expiry_date is 3 months or less then TRUE, else FALSE\n\
            - document_validity : The document must not be expired. TRUE if valid, else FALSE\n\
            - address_check : Must have a complete address with the required components. TRUE \
              if complete, else FALSE\n\
            - nationality_check : Must be a recognized sovereign nation. TRUE if valid, else \
              FALSE\n\
         7. For each extracted field, provide a confidence score which is the average \
            probability score of the tokens involved\n\n\
         {format_block}"
    )
}

fn user_prompt_registration(text: &str, as_of: NaiveDate) -> String {
    let today = as_of.format("%Y-%m-%d");
    let format_block = response_format_block(validation_checks(DocumentClass::Registration));
    format!(
        "Perform a comprehensive analysis of the following registration document:\n\n\
         DOCUMENT TEXT:\n{text}\n\n\
         COMPREHENSIVE ANALYSIS REQUIREMENTS:\n\
         1. Identify key registration metrics and their significance\n\
         2. Highlight potential compliance risks or regulatory concerns\n\
         3. Compare registration details against jurisdictional requirements\n\
         4. Provide a clear, concise summary with actionable insights\n\
         5. Extract the following details from the document if present, else print NULL\n\
            - language : Language of the document\n\
            - document_id : Document id mentioned in the document\n\
            - registration_details : {{\n\
                \"entity_name\": \"Name of the registered entity\",\n\
                \"entity_type\": \"Company/Charity/Individual\",\n\
                \"registration_number\": \"Official registration number\",\n\
                \"registration_date\": \"Date of registration\",\n\
                \"registration_address\": \"Official registered address\",\n\
                \"entity_status\": \"Active/Inactive/Suspended\",\n\
                \"country\": \"Country of registration\"\n\
            }}\n\
            - entity_classification : {{\n\
                \"primary_activity\": \"Main business activity\",\n\
                \"sector\": \"Industry sector\",\n\
                \"size_category\": \"Small/Medium/Large\",\n\
                \"regulatory_category\": \"Applicable regulatory framework\"\n\
            }}\n\
            - management_details : {{\n\
                \"directors\": [\"Director 1\", \"Director 2\"],\n\
                \"officers\": [\"Officer 1\", \"Officer 2\"],\n\
                \"authorized_representatives\": [\"Representative 1\", \"Representative 2\"]\n\
            }}\n\
            - document_date : Date of document creation/issuance\n\
            - validity_period : Registration validity period if applicable\n\
            - renewal_date : Next renewal date if applicable\n\
            - issuing_authority : Name of the registration authority\n\
            - jurisdiction : Governing law jurisdiction\n\
            {RISK_FIELDS}\n\
         6. Validate the extracted entities with the rules given below\n\
            - language : TRUE for the English language only; FALSE for all other languages\n\
            - age_check : Compare registration_date with {today}. If the difference between \
              {today} and registration_date is 3 months or less then TRUE, else FALSE\n\
            - jurisdiction_check : Must be a recognized legal jurisdiction, then TRUE, else \
              FALSE\n\
            - status_check : The entity must be in active status. TRUE if active, else FALSE\n\
            - entity_type_check : Must be one of the valid entity types \
              (Company/Charity/Individual). TRUE if valid, else FALSE\n\
         7. For each extracted field, provide a confidence score which is the average \
            probability score of the tokens involved\n\n\
         {format_block}"
    )
}

fn user_prompt_ownership(text: &str, as_of: NaiveDate) -> String {
    let today = as_of.format("%Y-%m-%d");
    let format_block = response_format_block(validation_checks(DocumentClass::Ownership));
    format!(
        "Perform a comprehensive analysis of the following ownership structure document:\n\n\
         DOCUMENT TEXT:\n{text}\n\n\
         COMPREHENSIVE ANALYSIS REQUIREMENTS:\n\
         1. Identify key ownership metrics and their significance\n\
         2. Highlight potential compliance risks or structural opportunities\n\
         3. Compare the ownership structure against regulatory standards\n\
         4. Provide a clear, concise summary with actionable insights\n\
         5. Extract the following details from the document if present, else print NULL\n\
            - language : Language of the document\n\
            - document_id : Document id mentioned in the document\n\
            - ownership_details : {{\n\
                \"shareholders\": [{{\n\
                    \"name\": \"Shareholder name\",\n\
                    \"ownership_percentage\": \"Percentage held\",\n\
                    \"share_type\": \"Type of shares\",\n\
                    \"voting_rights\": \"Voting rights details\"\n\
                }}],\n\
                \"beneficial_owners\": [{{\n\
                    \"name\": \"Owner name\",\n\
                    \"ownership_type\": \"Direct/Indirect ownership\",\n\
                    \"percentage\": \"Ownership percentage\"\n\
                }}]\n\
            }}\n\
            - public_due_diligence : {{\n\
                \"verification_status\": \"Verified/Pending\",\n\
                \"verification_date\": \"Date of verification\",\n\
                \"compliance_status\": \"Compliant/Non-compliant\",\n\
                \"findings\": [\"Finding 1\", \"Finding 2\"]\n\
            }}\n\
            - trust_deed : {{\n\
                \"deed_date\": \"Date of trust deed\",\n\
                \"trust_type\": \"Type of trust\",\n\
                \"trust_purpose\": \"Purpose of trust\",\n\
                \"trust_assets\": [\"Asset 1\", \"Asset 2\"],\n\
                \"beneficiaries\": [\"Beneficiary 1\", \"Beneficiary 2\"]\n\
            }}\n\
            - trustee_acceptance : {{\n\
                \"trustee_name\": \"Name of trustee\",\n\
                \"acceptance_date\": \"Date of acceptance\",\n\
                \"responsibilities\": [\"Responsibility 1\", \"Responsibility 2\"],\n\
                \"acceptance_status\": \"Accepted/Pending/Rejected\"\n\
            }}\n\
            - document_date : Date of document creation\n\
            - entity_name : Name of the entity\n\
            - registration_number : Entity registration number\n\
            - registered_address : Official registered address\n\
            - jurisdiction : Governing law jurisdiction\n\
            {RISK_FIELDS}\n\
         6. Validate the extracted entities with the rules given below\n\
            - language : TRUE for the English language only; FALSE for all other languages\n\
            - age_check : Compare document_date with {today}. If the difference between {today} \
              and document_date is 3 months or less then TRUE, else FALSE\n\
            - jurisdiction_check : Must be a recognized legal jurisdiction, then TRUE, else \
              FALSE\n\
            - ownership_percentage : The total ownership percentage must equal 100%. TRUE if it \
              equals 100%, else FALSE\n\
            - trustee_validation : Must have at least one accepted trustee. TRUE if present, \
              else FALSE\n\
         7. For each extracted field, provide a confidence score which is the average \
            probability score of the tokens involved\n\n\
         {format_block}"
    )
}

fn user_prompt_tax_return(text: &str, as_of: NaiveDate) -> String {
    let today = as_of.format("%Y-%m-%d");
    let format_block = response_format_block(validation_checks(DocumentClass::TaxReturn));
    format!(
        "Perform a comprehensive analysis of the following tax return document:\n\n\
         DOCUMENT TEXT:\n{text}\n\n\
         COMPREHENSIVE ANALYSIS REQUIREMENTS:\n\
         1. Identify key tax metrics and their significance\n\
         2. Highlight potential compliance risks or tax optimization opportunities\n\
         3. Compare tax rates and payments against jurisdictional standards\n\
         4. Provide a clear, concise summary with actionable insights\n\
         5. Extract the following details from the document if present, else print NULL\n\
            - language : Language of the document\n\
            - document_id : Document id mentioned in the document\n\
            - vat_number : VAT registration or tax identification number\n\
            - country : Country of tax jurisdiction\n\
            - tax_amount : Total tax amount stated\n\
            - due_tax_amount : Remaining tax amount to be paid\n\
            - tax_period_start : Start date of the tax period\n\
            - tax_period_end : End date of the tax period\n\
            - filing_status : Filed/Pending/Late\n\
            - filing_date : Date when the return was filed\n\
            - taxpayer_name : Individual or company name\n\
            - taxpayer_address : Registered address for tax purposes\n\
            - currency : Currency of the tax amounts\n\
            {RISK_FIELDS}\n\
         6. Validate the extracted entities with the rules given below\n\
            - language : TRUE for the English language only; FALSE for all other languages\n\
            - age_check : Compare tax_period_end or filing_date with {today}. If the \
              difference between {today} and the end date / filing_date is 3 months or less \
              then TRUE, else FALSE\n\
            - currency : The currency must be a real-world physical currency, then TRUE. If \
              any crypto, wallets, or virtual currencies are mentioned it must return FALSE\n\
            - tax_amount : Must be positive. TRUE if positive, else FALSE\n\
            - due_tax_amount : Must be non-negative. TRUE if non-negative, else FALSE\n\
         7. For each extracted field, provide a confidence score which is the average \
            probability score of the tokens involved\n\n\
         {format_block}"
    )
}

fn user_prompt_financial(text: &str, as_of: NaiveDate) -> String {
    let today = as_of.format("%Y-%m-%d");
    let format_block = response_format_block(validation_checks(DocumentClass::Financial));
    format!(
        "Perform a comprehensive analysis of the following financial document:\n\n\
         DOCUMENT TEXT:\n{text}\n\n\
         COMPREHENSIVE ANALYSIS REQUIREMENTS:\n\
         1. Identify key financial metrics and their significance\n\
         2. Highlight potential risks or opportunities\n\
         3. Compare metrics against industry benchmarks\n\
         4. Provide a clear, concise summary with actionable insights\n\
         5. Extract the following details from the document if present, else print NULL\n\
            - language : Language of the document\n\
            - document_id : Document id mentioned in the document\n\
            - company_name : Registered company name\n\
            - registration_number : Company registration number\n\
            - date_of_incorporation : Date of incorporation\n\
            - start_date : Oldest date mentioned in the document\n\
            - end_date : Most recent date mentioned in the document\n\
            - company_status : Active/Inactive\n\
            - registered_address : Official registered address\n\
            - currency : Currency of the stated amounts\n\
            - nationality : Nation in which the company is registered\n\
            {RISK_FIELDS}\n\
         6. Validate the extracted entities with the rules given below\n\
            - language : TRUE for the English language only; FALSE for all other languages\n\
            - age_check : Compare the end date or date of incorporation with {today}. If the \
              difference between {today} and the end date / date of incorporation is 3 months \
              or less then TRUE, else FALSE\n\
            - currency : The currency must be a real-world physical currency, then TRUE. If \
              any crypto, wallets, or virtual currencies are mentioned it must return FALSE\n\
            - revenue : Must be positive. TRUE if positive, else FALSE\n\
            - payment : Must be positive. TRUE if positive, else FALSE\n\
         7. For each extracted field, provide a confidence score which is the average \
            probability score of the tokens involved\n\n\
         {format_block}"
    )
}

/// Risk fields shared by every category's extraction list.
const RISK_FIELDS: &str = "- risk_score : On a scale of 1 to 10. Higher risk must return a \
                           larger number; lower risk returns a smaller number\n\
            - risk_level : One of \"High\", \"Moderate\", \"Low\"";

const RESPONSE_FORMAT_TEMPLATE: &str = r#"Respond in the following structured JSON format:
{
    "summary": {"value": "High-level executive summary", "confidence_score": <average_probability_score>},
    "key_metrics": {
        "metric_name": {
            "value": "specific value",
            "interpretation": "expert analysis"
        },
        "confidence_score": <average_probability_score>
    },
    "risks": {"value": ["Risk 1", "Risk 2"], "confidence_score": <average_probability_score>},
    "opportunities": {"value": ["Opportunity 1", "Opportunity 2"], "confidence_score": <average_probability_score>},
    "required_actions": {"value": ["Strategic recommendations based on analysis"], "confidence_score": <average_probability_score>},
    "document_details": {"value": "details fetched from document", "confidence_score": <average_probability_score>},
    "validation": {
__VALIDATION_CHECKS__        "confidence_score": <average_probability_score>
    }
}"#;

/// Render the shared response envelope with a category's validation checks.
fn response_format_block(checks: &[&str]) -> String {
    let checks_block: String = checks
        .iter()
        .map(|check| format!("        \"{check}\": TRUE/FALSE,\n"))
        .collect();
    RESPONSE_FORMAT_TEMPLATE.replace("__VALIDATION_CHECKS__", &checks_block)
}
