use anyhow::{Context, Result, bail};
use clap::{Parser as ClapParser, ValueEnum};
use markup_config::Config;
use markup_syntax::{Node, Parser, format_tree, plain_text, to_markup};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(ClapParser)]
#[command(name = "markup")]
#[command(about = "Parse inline markup and print the resulting tree")]
struct Args {
    /// File to parse. Reads stdin when omitted or `-`
    file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Tree)]
    format: Format,

    /// Config file to use instead of ~/.config/markup/config.toml
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Indented node tree
    Tree,
    /// Nodes as JSON
    Json,
    /// Nodes written back as markup
    Markup,
    /// Text with all delimiters removed
    Text,
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args = Args::parse();
    let parser = load_parser(args.config.as_deref())?;
    let input = read_input(args.file.as_deref())?;

    let nodes = parser.parse(&input).context("Failed to parse input")?;
    print!("{}", render(&nodes, args.format, &parser)?);

    Ok(())
}

fn load_parser(config_path: Option<&Path>) -> Result<Parser> {
    let config = match config_path {
        Some(path) => match Config::load_from_path(path)? {
            Some(config) => config,
            None => bail!("Config file not found: {}", path.display()),
        },
        None => {
            log::debug!("Config path: {}", Config::config_path().display());
            Config::load()?.unwrap_or_default()
        }
    };

    Ok(config.parser()?)
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            Ok(input)
        }
    }
}

fn render(nodes: &[Node], format: Format, parser: &Parser) -> Result<String> {
    Ok(match format {
        Format::Tree => format_tree(nodes),
        Format::Json => {
            let mut json = serde_json::to_string_pretty(nodes)?;
            json.push('\n');
            json
        }
        Format::Markup => to_markup(nodes, parser.table()),
        Format::Text => plain_text(nodes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn args_are_well_formed() {
        Args::command().debug_assert();
    }

    #[test]
    fn default_format_is_tree() {
        let args = Args::try_parse_from(["markup"]).unwrap();
        assert_eq!(args.format, Format::Tree);
        assert!(args.file.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn parses_all_options() {
        let args =
            Args::try_parse_from(["markup", "notes.txt", "--format", "json", "-c", "my.toml"])
                .unwrap();
        assert_eq!(args.file, Some(PathBuf::from("notes.txt")));
        assert_eq!(args.format, Format::Json);
        assert_eq!(args.config, Some(PathBuf::from("my.toml")));
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(Args::try_parse_from(["markup", "--format", "html"]).is_err());
    }

    #[test]
    fn render_each_format() {
        let parser = Parser::default();
        let nodes = parser.parse("a *b*").unwrap();

        assert_eq!(
            render(&nodes, Format::Tree, &parser).unwrap(),
            "Text \"a \"\nStrong\n  Text \"b\"\n"
        );
        assert_eq!(render(&nodes, Format::Markup, &parser).unwrap(), "a *b*");
        assert_eq!(render(&nodes, Format::Text, &parser).unwrap(), "a b");

        let json: serde_json::Value =
            serde_json::from_str(&render(&nodes, Format::Json, &parser).unwrap()).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "text": "a " },
                { "container": { "kind": "strong", "children": [{ "text": "b" }] } },
            ])
        );
    }

    #[test]
    fn reads_input_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("input.txt");
        std::fs::write(&file, "*hi*").unwrap();

        assert_eq!(read_input(Some(&file)).unwrap(), "*hi*");
    }

    #[test]
    fn missing_input_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_input(Some(&temp_dir.path().join("nope.txt"))).unwrap_err();
        assert!(err.to_string().starts_with("Failed to read"));
    }

    #[test]
    fn explicit_config_is_used() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "max_depth = 3\n[delimiters]\n\"+\" = \"strong\"\n").unwrap();

        let parser = load_parser(Some(&config_file)).unwrap();
        assert_eq!(parser.max_depth(), 3);
        assert_eq!(
            parser.parse("+x+").unwrap(),
            vec![Node::strong(vec![Node::text("x")])]
        );
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_parser(Some(&temp_dir.path().join("missing.toml"))).unwrap_err();
        assert!(err.to_string().starts_with("Config file not found"));
    }

    #[test]
    fn invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(&config_file, "[delimiters]\n\"ab\" = \"strong\"\n").unwrap();

        assert!(load_parser(Some(&config_file)).is_err());
    }
}
