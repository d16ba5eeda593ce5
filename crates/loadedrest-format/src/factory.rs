//! Format lookup by name.

use crate::error::FormatError;
use crate::format::{Format, FormatOptions};
use crate::json::JsonFormat;
use crate::xml::XmlFormat;

/// Name of the format used when a client asks for one that does not exist.
pub const DEFAULT_FORMAT: &str = "json";

type Constructor = fn(FormatOptions) -> Box<dyn Format>;

/// Every known format. Adding a format means adding a row here.
static REGISTRY: &[(&str, Constructor)] = &[
    (JsonFormat::NAME, create_json),
    (XmlFormat::NAME, create_xml),
];

fn create_json(options: FormatOptions) -> Box<dyn Format> {
    Box::new(JsonFormat::new(options))
}

fn create_xml(options: FormatOptions) -> Box<dyn Format> {
    Box::new(XmlFormat::new(options))
}

/// Creates formats by name.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatFactory {
    options: FormatOptions,
}

impl FormatFactory {
    /// Create a factory handing `options` to every format it builds.
    #[must_use]
    pub fn new(options: FormatOptions) -> Self {
        Self { options }
    }

    /// Options passed to created formats.
    #[must_use]
    pub fn options(&self) -> FormatOptions {
        self.options
    }

    /// Names of all registered formats.
    pub fn names() -> impl Iterator<Item = &'static str> {
        REGISTRY.iter().map(|(name, _)| *name)
    }

    /// Create the format registered under `name`, ignoring ASCII case.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::UnknownFormat`] if no format has that name.
    pub fn create(&self, name: &str) -> Result<Box<dyn Format>, FormatError> {
        REGISTRY
            .iter()
            .find(|(registered, _)| registered.eq_ignore_ascii_case(name))
            .map(|(_, constructor)| constructor(self.options))
            .ok_or_else(|| FormatError::UnknownFormat(name.to_owned()))
    }

    /// Create the format registered under `name`, or the [`DEFAULT_FORMAT`]
    /// if there is none.
    ///
    /// Never fails: an unknown or empty name from the client still gets an
    /// answer it can read.
    #[must_use]
    pub fn create_or_default(&self, name: &str) -> Box<dyn Format> {
        match self.create(name) {
            Ok(format) => format,
            Err(err) => {
                tracing::warn!(%err, fallback = DEFAULT_FORMAT, "falling back to default format");
                self.create(DEFAULT_FORMAT)
                    .expect("default format is always registered")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use loadedrest_model::Exception;

    use super::*;

    #[test]
    fn test_should_create_registered_formats() {
        let factory = FormatFactory::default();
        assert_eq!(factory.create("json").unwrap().name(), "json");
        assert_eq!(factory.create("xml").unwrap().name(), "xml");
    }

    #[test]
    fn test_should_match_names_ignoring_case() {
        let factory = FormatFactory::default();
        assert_eq!(factory.create("XML").unwrap().name(), "xml");
        assert_eq!(factory.create("Json").unwrap().name(), "json");
    }

    #[test]
    fn test_should_reject_unknown_format() {
        let err = FormatFactory::default().create("yaml").unwrap_err();
        assert!(matches!(err, FormatError::UnknownFormat(ref name) if name == "yaml"));
    }

    #[test]
    fn test_should_fall_back_to_default_format() {
        let factory = FormatFactory::default();
        for name in ["bogus", "", " json", "xml2"] {
            assert_eq!(factory.create_or_default(name).name(), DEFAULT_FORMAT);
        }
        assert_eq!(factory.create_or_default("xml").name(), "xml");
    }

    #[test]
    fn test_should_list_registered_names() {
        let names: Vec<_> = FormatFactory::names().collect();
        assert_eq!(names, vec!["json", "xml"]);
        assert!(names.contains(&DEFAULT_FORMAT));
    }

    #[test]
    fn test_should_pass_options_to_created_formats() {
        let factory = FormatFactory::new(FormatOptions::with_debug(true));
        assert!(factory.options().debug);

        let exception = Exception::invalid_parameter("additional info");
        for name in FormatFactory::names() {
            let mut out = Vec::new();
            factory
                .create(name)
                .unwrap()
                .send_error(&exception, &mut out)
                .unwrap();
            let output = String::from_utf8(out).unwrap();
            assert!(output.contains("additional info"), "{name}: {output}");
        }
    }

    #[test]
    fn test_should_create_independent_instances() {
        let factory = FormatFactory::default();
        let first = factory.create("json").unwrap();
        let second = factory.create("json").unwrap();
        assert!(first.parse_request_body(b"{", None).is_err());
        assert!(second.parse_request_body(b"{}", None).is_ok());
    }
}
