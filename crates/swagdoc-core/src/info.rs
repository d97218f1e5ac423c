//! Global API metadata taken from the entry file's doc comments.

use log::debug;

use crate::media::{content_types_by_doc, split_list};
use crate::model::Swagger;
use crate::scan::scan_block;

/// Separator placed between successive `@Description` values.
pub const DESCRIPTION_SEPARATOR: &str = "<br>";

/// A recognized global annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoTag {
    Version,
    Title,
    Description,
    TermsOfServiceUrl,
    ContactEmail,
    ContactName,
    Url,
    LicenseUrl,
    License,
    Schemes,
    Host,
    BasePath,
    Consumes,
    Produces,
}

/// The global tag vocabulary in dispatch priority order.
pub const INFO_TAGS: &[(&str, InfoTag)] = &[
    ("@APIVersion", InfoTag::Version),
    ("@Title", InfoTag::Title),
    ("@Description", InfoTag::Description),
    ("@TermsOfServiceUrl", InfoTag::TermsOfServiceUrl),
    ("@Contact", InfoTag::ContactEmail),
    ("@Name", InfoTag::ContactName),
    ("@URL", InfoTag::Url),
    ("@LicenseUrl", InfoTag::LicenseUrl),
    ("@License", InfoTag::License),
    ("@Schemes", InfoTag::Schemes),
    ("@Host", InfoTag::Host),
    ("@BasePath", InfoTag::BasePath),
    ("@Consumes", InfoTag::Consumes),
    ("@Produces", InfoTag::Produces),
];

/// Which object a bare `@URL` line belongs to, decided by the tag group seen last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum UrlTarget {
    #[default]
    Contact,
    License,
}

/// Applies scanned tags to a document, one line at a time.
#[derive(Debug, Default)]
pub struct InfoAssembler {
    url_target: UrlTarget,
}

impl InfoAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan one comment block and apply every recognized line to `spec`.
    pub fn apply_block(&mut self, spec: &mut Swagger, block: &str) {
        for (tag, value) in scan_block(block, INFO_TAGS) {
            self.apply(spec, tag, value);
        }
    }

    /// Apply a single tag. Single-valued fields take the last value seen;
    /// the description accumulates.
    pub fn apply(&mut self, spec: &mut Swagger, tag: InfoTag, value: &str) {
        debug!("info tag {tag:?} = {value:?}");
        let info = &mut spec.info;
        match tag {
            InfoTag::Version => info.version = value.to_string(),
            InfoTag::Title => info.title = value.to_string(),
            InfoTag::Description => append_description(&mut info.description, value),
            InfoTag::TermsOfServiceUrl => info.terms_of_service = value.to_string(),
            InfoTag::ContactEmail => {
                info.contact.email = value.to_string();
                self.url_target = UrlTarget::Contact;
            }
            InfoTag::ContactName => {
                info.contact.name = value.to_string();
                self.url_target = UrlTarget::Contact;
            }
            InfoTag::Url => match self.url_target {
                UrlTarget::Contact => info.contact.url = value.to_string(),
                UrlTarget::License => info.license.url = value.to_string(),
            },
            InfoTag::LicenseUrl => {
                info.license.url = value.to_string();
                self.url_target = UrlTarget::License;
            }
            InfoTag::License => {
                info.license.name = value.to_string();
                self.url_target = UrlTarget::License;
            }
            InfoTag::Schemes => spec.schemes = split_list(value).map(str::to_string).collect(),
            InfoTag::Host => spec.host = value.to_string(),
            InfoTag::BasePath => spec.base_path = value.to_string(),
            InfoTag::Consumes => spec.consumes = content_types_by_doc(value),
            InfoTag::Produces => spec.produces = content_types_by_doc(value),
        }
    }
}

/// Append `value` to `description`, separated by `<br>` when both are non-empty.
pub fn append_description(description: &mut String, value: &str) {
    if value.is_empty() {
        return;
    }
    if !description.is_empty() {
        description.push_str(DESCRIPTION_SEPARATOR);
    }
    description.push_str(value);
}

/// Populate the global metadata of `spec` from the entry file's comment blocks.
pub fn assemble_info<S: AsRef<str>>(spec: &mut Swagger, blocks: &[S]) {
    let mut assembler = InfoAssembler::new();
    for block in blocks {
        assembler.apply_block(spec, block.as_ref());
    }
}
