//! Command-line arguments and their translation into a call.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use serde_json::Value;

use courier_application::RequestOptions;
use courier_domain::{
    ClientSettings, EndpointDescriptor, HttpMethod, Pagination, Payload, SortOrder, SortSpec,
    catalog,
};

/// Dispatch one request to a backend service.
#[derive(Parser, Debug)]
#[command(
    name = "courier",
    version,
    about = "Dispatch one request through the Courier pipeline",
    long_about = None
)]
pub struct Cli {
    /// Backend service name
    pub service: String,

    /// Controller name
    pub controller: String,

    /// Action name
    pub action: String,

    /// HTTP verb; defaults to the catalog entry or GET
    #[arg(short, long)]
    pub method: Option<HttpMethod>,

    /// Explicit URL, bypasses path synthesis
    #[arg(long)]
    pub url: Option<String>,

    /// Request payload as a JSON object
    #[arg(short, long, value_parser = parse_payload)]
    pub data: Option<Payload>,

    /// Extra path segment (repeatable)
    #[arg(long = "append", value_name = "SEGMENT")]
    pub append: Vec<String>,

    /// Sort entry as `property[,asc|desc]` (repeatable)
    #[arg(long, value_name = "PROPERTY,DIR")]
    pub sort: Vec<SortOrder>,

    /// Zero-based page to request from a paginated listing
    #[arg(long, value_name = "N")]
    pub page: Option<u32>,

    /// Page size; implies `--page 0` when given alone
    #[arg(long, value_name = "N")]
    pub size: Option<u32>,

    /// Show a loading indicator while the call is in flight; the process
    /// stays up until the indicator is dismissed
    #[arg(long)]
    pub loading: bool,

    /// Do not open the login flow on 403
    #[arg(long)]
    pub skip_auth: bool,

    /// Confirm the session-expired dialog without waiting for a user
    #[arg(long)]
    pub auto_confirm: bool,

    /// Settings file
    #[arg(long, env = "COURIER_SETTINGS", value_name = "PATH")]
    pub settings: Option<PathBuf>,

    /// Key/value storage file holding the auth token
    #[arg(long, env = "COURIER_STORAGE", value_name = "PATH")]
    pub storage: Option<PathBuf>,
}

fn parse_payload(raw: &str) -> Result<Payload, String> {
    match serde_json::from_str(raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err("payload must be a JSON object".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

impl Cli {
    /// Resolves the endpoint descriptor.
    ///
    /// Known catalog entries supply the verb when `--method` is absent.
    #[must_use]
    pub fn descriptor(&self) -> EndpointDescriptor {
        let known = (self.service == "file-service")
            .then(catalog::file_service)
            .and_then(|catalog| {
                catalog
                    .get(&self.action)
                    .filter(|d| d.controller.as_deref() == Some(self.controller.as_str()))
                    .and_then(|d| d.method)
            });

        let mut descriptor =
            EndpointDescriptor::new(&self.service, &self.controller, &self.action);
        descriptor.url.clone_from(&self.url);
        descriptor.method = self.method.or(known);
        descriptor
    }

    /// Returns the requested page, if the call is paginated.
    #[must_use]
    pub fn pagination(&self) -> Option<Pagination> {
        match (self.page, self.size) {
            (None, None) => None,
            (page, size) => {
                let default = Pagination::default();
                Some(Pagination::new(
                    page.unwrap_or(default.page),
                    size.unwrap_or(default.size),
                ))
            }
        }
    }

    /// Returns how long to stay up after the outcome so the loading
    /// indicator's delayed dismissal still runs.
    #[must_use]
    pub const fn linger(&self, settings: &ClientSettings) -> Option<Duration> {
        if self.loading {
            Some(Duration::from_millis(settings.loading_dismiss_delay_ms))
        } else {
            None
        }
    }

    /// Builds the call options.
    #[must_use]
    pub fn options(&self) -> RequestOptions {
        let mut options = RequestOptions::new(self.descriptor())
            .loading(self.loading)
            .skip_auth(self.skip_auth);
        if let Some(data) = &self.data {
            options = options.data(data.clone());
        }
        for segment in &self.append {
            options = options.append(segment.clone());
        }
        if !self.sort.is_empty() {
            options = options.sort(self.sort.iter().cloned().collect::<SortSpec>());
        }
        options
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("courier").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_minimal_arguments() {
        let cli = parse(&["case-service", "caseController", "list"]);
        let descriptor = cli.descriptor();
        assert_eq!(descriptor.method(), HttpMethod::Get);
        assert_eq!(descriptor.url, None);
        assert!(!cli.loading);
        assert_eq!(cli.pagination(), None);
        assert_eq!(cli.linger(&ClientSettings::default()), None);
    }

    #[test]
    fn test_pagination_arguments() {
        let cli = parse(&["s", "c", "list", "--size", "25"]);
        assert_eq!(cli.pagination(), Some(Pagination::new(0, 25)));

        let cli = parse(&["s", "c", "list", "--page", "2"]);
        assert_eq!(cli.pagination(), Some(Pagination::new(2, 10)));
    }

    #[test]
    fn test_loading_lingers_for_dismiss_delay() {
        let cli = parse(&["s", "c", "list", "--loading", "--auto-confirm"]);
        let settings = ClientSettings {
            loading_dismiss_delay_ms: 750,
            ..ClientSettings::default()
        };
        assert_eq!(cli.linger(&settings), Some(Duration::from_millis(750)));
        assert!(cli.auto_confirm);
    }

    #[test]
    fn test_full_arguments() {
        let cli = parse(&[
            "case-service",
            "caseController",
            "search",
            "--method",
            "post",
            "--data",
            r#"{"name":"x","page":0}"#,
            "--append",
            "42",
            "--sort",
            "name,desc",
            "--sort",
            "id",
            "--loading",
            "--skip-auth",
        ]);

        let options = cli.options();
        assert_eq!(options.server.method(), HttpMethod::Post);
        assert_eq!(options.data.get("name"), Some(&json!("x")));
        assert_eq!(options.append, vec!["42".to_string()]);
        let sort = options.sort.unwrap();
        assert_eq!(sort.orders().len(), 2);
        assert_eq!(sort.orders()[1].property, "id");
        assert!(options.loading);
        assert!(options.skip_auth);
    }

    #[test]
    fn test_catalog_supplies_method() {
        let cli = parse(&["file-service", "fileUploadController", "upload"]);
        assert_eq!(cli.descriptor().method(), HttpMethod::Post);

        let cli = parse(&["file-service", "otherController", "upload"]);
        assert_eq!(cli.descriptor().method(), HttpMethod::Get);
    }

    #[test]
    fn test_rejects_bad_values() {
        let args = ["courier", "s", "c", "a", "--data", "[1]"];
        assert!(Cli::try_parse_from(args).is_err());

        let args = ["courier", "s", "c", "a", "--sort", "name,sideways"];
        assert!(Cli::try_parse_from(args).is_err());

        let args = ["courier", "s", "c", "a", "--method", "FETCH"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
