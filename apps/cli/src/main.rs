//! QuickGO command line front end
//!
//! Usage:
//!   quickgo query "kinase" --filter taxonId:9606 --facet aspect --limit 10
//!   quickgo flat encode '["GO:0005623", "cell", ["PMID:1"]]'
//!   quickgo flat decode '{--name|--|exact--}'

mod logging;
mod settings;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use quickgo_flatfield::FlatField;
use quickgo_search::solr::{SolrQueryConverter, SolrQuerySerializer};
use quickgo_search::{SearchParameters, StringToQueryConverter, DEFAULT_LIMIT, DEFAULT_PAGE};
use std::path::PathBuf;
use std::sync::Arc;

use settings::Settings;

#[derive(Parser, Debug)]
#[clap(name = "quickgo", version)]
#[clap(about = "Build QuickGO search requests and encode nested flat fields")]
struct Cli {
    /// Settings file (TOML)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate search input and print the backend request
    Query(QueryArgs),

    /// Encode or decode a nested flat field
    #[clap(subcommand)]
    Flat(FlatCommand),
}

#[derive(Args, Debug)]
struct QueryArgs {
    /// Query text, either a bare value or `field:value`
    text: String,

    /// Filter query of the form `field:value` (repeatable)
    #[clap(long = "filter")]
    filters: Vec<String>,

    /// Field to facet on (repeatable)
    #[clap(long = "facet")]
    facets: Vec<String>,

    #[clap(long, default_value_t = DEFAULT_PAGE, allow_negative_numbers = true)]
    page: i64,

    /// Results per page
    #[clap(long, default_value_t = DEFAULT_LIMIT, allow_negative_numbers = true)]
    limit: i64,

    #[clap(long)]
    highlight: bool,

    #[clap(long, value_enum, default_value_t = OutputFormat::Params)]
    format: OutputFormat,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// One `key=value` pair per line
    Params,
    /// URL-encoded query string
    Url,
    /// Request and parameters as JSON
    Json,
}

#[derive(Subcommand, Debug)]
enum FlatCommand {
    /// Serialize a JSON tree (string = value, array = nested level)
    Encode { json: String },
    /// Parse stored text and print the tree as JSON
    Decode { text: String },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    settings
        .validate()
        .map_err(|e| anyhow::anyhow!("Invalid settings: {e}"))?;

    logging::init_logging(&settings.logging).context("Failed to initialize logging")?;

    let output = match cli.command {
        Command::Query(args) => render_query(args, &settings)?,
        Command::Flat(FlatCommand::Encode { json }) => encode_flat(&json)?,
        Command::Flat(FlatCommand::Decode { text }) => decode_flat(&text)?,
    };
    println!("{output}");
    Ok(())
}

fn render_query(args: QueryArgs, settings: &Settings) -> Result<String> {
    let fields = Arc::new(settings.searchable());
    let converter = match &settings.default_field {
        Some(field) => StringToQueryConverter::with_default_field(field, fields.clone())?,
        None => StringToQueryConverter::new(fields.clone()),
    };

    let params = SearchParameters {
        query: Some(args.text),
        limit: args.limit,
        page: args.page,
        filter_queries: (!args.filters.is_empty()).then_some(args.filters),
        facets: (!args.facets.is_empty()).then_some(args.facets),
        highlighting: args.highlight,
    };
    let request = params.into_request(&converter, fields.as_ref())?;
    tracing::debug!(?request, "Built query request");

    let serializer = if settings.grouped_fields.is_empty() {
        SolrQuerySerializer::new()
    } else {
        SolrQuerySerializer::with_grouped_fields(settings.grouped_fields.iter().cloned())
    };
    let solr = SolrQueryConverter::with_serializer(settings.request_handler.as_str(), serializer)?;
    let solr_params = solr.convert(&request);

    Ok(match args.format {
        OutputFormat::Params => solr_params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Url => solr_params.to_query_string(),
        OutputFormat::Json => serde_json::to_string_pretty(&serde_json::json!({
            "request": request,
            "params": solr_params.iter().collect::<Vec<_>>(),
        }))?,
    })
}

fn encode_flat(json: &str) -> Result<String> {
    let value: serde_json::Value = serde_json::from_str(json).context("Input is not valid JSON")?;
    let field = FlatField::from_json(&value)?;
    Ok(field.to_string())
}

fn decode_flat(text: &str) -> Result<String> {
    let field: FlatField = text.parse()?;
    Ok(serde_json::to_string_pretty(&field.to_json())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query_args(text: &str) -> QueryArgs {
        QueryArgs {
            text: text.to_string(),
            filters: Vec::new(),
            facets: Vec::new(),
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            highlight: false,
            format: OutputFormat::Params,
        }
    }

    #[test]
    fn cli_parses_repeated_filters() {
        let cli = Cli::try_parse_from([
            "quickgo",
            "query",
            "kinase",
            "--filter",
            "taxonId:9606",
            "--filter",
            "evidenceCode:IEA",
            "--format",
            "url",
        ])
        .unwrap();

        let Command::Query(args) = cli.command else {
            panic!("expected the query command");
        };
        assert_eq!(args.filters, vec!["taxonId:9606", "evidenceCode:IEA"]);
        assert_eq!(args.format, OutputFormat::Url);
        assert_eq!(args.limit, 25);
    }

    #[test]
    fn query_prints_one_parameter_per_line() {
        let settings = Settings::from_toml("").unwrap();
        let output = render_query(query_args("assignedBy:UniProt"), &settings).unwrap();
        assert_eq!(output, "q=assignedBy:(UniProt)\nqt=/search\nstart=0\nrows=25");
    }

    #[test]
    fn default_field_scopes_bare_text() {
        let settings = Settings::from_toml(r#"default_field = "name""#).unwrap();
        let output = render_query(query_args("kinase"), &settings).unwrap();
        assert!(output.starts_with("q=name:(kinase)\n"));
    }

    #[test]
    fn unsearchable_facet_fails() {
        let settings = Settings::from_toml("").unwrap();
        let mut args = query_args("kinase");
        args.facets = vec!["notAField".to_string()];
        let err = render_query(args, &settings).unwrap_err();
        assert!(err.to_string().starts_with("Bad request"));
    }

    #[test]
    fn flat_commands_invert_each_other() {
        let encoded = encode_flat(r#"["GO:0005623", "cell", ["PMID:1", ""]]"#).unwrap();
        assert_eq!(encoded, "{--GO:0005623|--|cell|--|{--PMID:1|--|--}--}");

        let decoded: serde_json::Value = serde_json::from_str(&decode_flat(&encoded).unwrap()).unwrap();
        assert_eq!(decoded, serde_json::json!(["GO:0005623", "cell", ["PMID:1", ""]]));
    }

    #[test]
    fn malformed_flat_text_fails() {
        assert!(decode_flat("{--a|--|b").is_err());
        assert!(encode_flat("{\"a\": 1}").is_err());
    }
}
