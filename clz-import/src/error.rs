/// Errors that can occur while reading a collection export.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("Invalid export: {0}")]
    InvalidExport(String),
}

impl ImportError {
    pub fn invalid_export(msg: impl Into<String>) -> Self {
        Self::InvalidExport(msg.into())
    }
}
