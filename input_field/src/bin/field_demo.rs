// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Drives one [`InputField`] from stdin, so every variant can be tried from a shell.
//!
//! Each stdin line is typed into the field one char at a time, the way a UI would feed
//! it. Lines that start with `!` are commands instead:
//!
//! | Line               | Does                                       |
//! | :----------------- | :----------------------------------------- |
//! | `!ArrowDown` etc.  | a [`FieldKey`], by name                    |
//! | `!blur`, `!focus`  | focus changes                              |
//! | `!clear`           | the clear button                           |
//! | `!pick <index>`    | a click on a suggestion row                |
//! | `!remove <chip>`   | the remove button on a chip                |
//! | `!write <text>`    | a write from the host                      |
//!
//! After every line the field's display and raw values are printed. At end of input
//! the field is blurred and printed one last time.
//!
//! ```text
//! $ printf '5551234567\n' | field_demo --variant mask
//! $ printf 'rust, tokio,ser\n!Backspace\n' | field_demo --variant chip
//! $ printf '1234.5\n!blur\n' | field_demo --variant numeric --currency EUR
//! $ printf 'ne\n!ArrowDown\n!Enter\n' | field_demo --variant autocomplete
//! ```

use std::{io::{Stdout, Write, stdout},
          path::PathBuf,
          str::FromStr as _,
          time::Duration};

use clap::{Parser, ValueEnum};
use miette::IntoDiagnostic as _;
use r3bl_input_field::{AutocompleteConfig, ChipConfig, DEFAULT_DEBOUNCE_DELAY_MS,
                       DEFAULT_MIN_QUERY_LENGTH, FieldConfig, FieldKey, InputField,
                       ItemExtractor, NumericMode, RawValue, SelectionOrigin,
                       TracingConfig, ValueSink, VariantKind, ok,
                       setup_default_miette_global_report_handler,
                       try_initialize_logging_global};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt as _, BufReader};
use tracing_core::LevelFilter;

const ISSUES_URL: &str = "https://github.com/r3bl-org/r3bl-open-core/issues/new";

/// Pretend network latency for the built in lookup.
const LOOKUP_LATENCY_MS: u64 = 120;

const US_STATES: &[(&str, &str)] = &[
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum VariantArg {
    Plain,
    Mask,
    Chip,
    Numeric,
    Autocomplete,
}

#[derive(Debug, Parser)]
#[command(bin_name = "field_demo")]
#[command(about = "Type stdin lines into a text field and print what it shows and reports")]
#[command(version)]
#[command(next_line_help = true)]
/// More info: <https://docs.rs/clap/latest/clap/_derive/#overview>
struct CLIArg {
    #[arg(long, short = 'v', value_enum, default_value_t = VariantArg::Plain)]
    variant: VariantArg,

    #[arg(long, default_value = "(999) 999-9999", help = "Mask for `--variant mask`")]
    mask: String,

    #[arg(long, short = 's', default_value = ",", help = "Chip separator")]
    separator: String,

    #[arg(long, help = "Treat `--separator` as a regex matched against one char")]
    separator_is_pattern: bool,

    #[arg(long, help = "ISO 4217 code; turns `--variant numeric` into currency mode")]
    currency: Option<String>,

    #[arg(long, default_value_t = DEFAULT_MIN_QUERY_LENGTH)]
    min_query_length: usize,

    #[arg(long, default_value_t = DEFAULT_DEBOUNCE_DELAY_MS)]
    delay_ms: u64,

    #[arg(
        long,
        short = 'c',
        help = "JSON field config file; overrides every other variant option"
    )]
    config: Option<PathBuf>,

    #[arg(
        long,
        short = 'l',
        help = "Log field internals to a file named `log.txt` for debugging"
    )]
    enable_logging: bool,
}

impl CLIArg {
    fn try_into_field_config(&self) -> miette::Result<FieldConfig> {
        if let Some(path) = &self.config {
            let json = std::fs::read_to_string(path).into_diagnostic()?;
            return FieldConfig::try_from_json(&json);
        }

        Ok(match self.variant {
            VariantArg::Plain => FieldConfig::default(),
            VariantArg::Mask => FieldConfig::mask(self.mask.clone()),
            VariantArg::Chip => FieldConfig::chips(if self.separator_is_pattern {
                ChipConfig::pattern(self.separator.clone())
            } else {
                ChipConfig::literal(self.separator.clone())
            }),
            VariantArg::Numeric => FieldConfig::numeric(match &self.currency {
                Some(currency_code) => NumericMode::Currency {
                    currency_code: currency_code.clone(),
                },
                None => NumericMode::Decimal,
            }),
            VariantArg::Autocomplete => FieldConfig::autocomplete(AutocompleteConfig {
                min_query_length: self.min_query_length,
                delay_ms: self.delay_ms,
                label: ItemExtractor::key("name"),
                value: ItemExtractor::key("code"),
                ..Default::default()
            }),
        })
    }
}

/// Writes every callback to `out` as it happens. The demo writes to stdout.
struct PrintingSink<W: Write> {
    out: W,
}

type DemoField = InputField<PrintingSink<Stdout>>;

impl<W: Write> ValueSink for PrintingSink<W> {
    fn on_value_change(&mut self, raw: &RawValue) {
        tracing::debug!(raw = ?raw, "value change");
        // A closed stdout just means nobody is reading.
        writeln!(self.out, "  changed to {raw:?}").ok();
    }

    fn on_item_select(&mut self, origin: SelectionOrigin, value: &Value) {
        writeln!(self.out, "  picked {value} ({origin:?})").ok();
    }

    fn request_focus(&mut self) { writeln!(self.out, "  focus requested").ok(); }
}

/// Case insensitive prefix match on [`US_STATES`], returned as `{name, code}` items.
async fn lookup_us_states(query: String) -> miette::Result<Value> {
    tokio::time::sleep(Duration::from_millis(LOOKUP_LATENCY_MS)).await;
    let query = query.to_lowercase();
    let items = US_STATES
        .iter()
        .filter(|(name, _)| name.to_lowercase().starts_with(&query))
        .map(|(name, code)| json!({"name": name, "code": code}))
        .collect();
    Ok(Value::Array(items))
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    setup_default_miette_global_report_handler(ISSUES_URL);

    let cli_arg = CLIArg::parse();

    if cli_arg.enable_logging {
        try_initialize_logging_global(TracingConfig::new_file(None, LevelFilter::DEBUG))?;
        // % is Display, ? is Debug.
        tracing::debug!(message = "Start logging...", cli_arg = ?cli_arg);
    }

    let config = cli_arg.try_into_field_config()?;
    let sink = PrintingSink { out: stdout() };
    let mut field = if config.variant_kind() == VariantKind::Autocomplete {
        InputField::try_new_with_lookup(config, sink, lookup_us_states)?
    } else {
        InputField::try_new(config, sink)?
    };
    field.focus();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.into_diagnostic()? {
        run_line(&mut field, &line);
        while field.process_next_signal().await {}
        print_field(&field);
    }

    field.blur();
    while field.process_next_signal().await {}
    print_field(&field);

    ok!()
}

fn run_line(field: &mut DemoField, line: &str) {
    let Some(command) = line.strip_prefix('!') else {
        for ch in line.chars() {
            let mut text = field.display().to_string();
            text.push(ch);
            field.handle_keystroke(&text);
        }
        return;
    };

    let (name, arg) = command.split_once(' ').unwrap_or((command, ""));
    match name {
        "blur" => field.blur(),
        "focus" => field.focus(),
        "clear" => field.clear(),
        "write" => field.write(Some(RawValue::from(arg))),
        "remove" => {
            if !field.remove_chip(arg) {
                println!("  no chip named {arg:?}");
            }
        }
        "pick" => match arg.parse::<usize>() {
            Ok(index) => {
                field.select_with_pointer(index);
            }
            Err(_) => println!("  `!pick` needs a row index"),
        },
        _ => match FieldKey::from_str(name) {
            Ok(key) => {
                let propagation = field.handle_key(key);
                println!("  {key} -> {propagation:?}");
            }
            Err(_) => println!("  unknown command {name:?}"),
        },
    }
}

fn print_field(field: &DemoField) {
    println!("display={:?} raw={:?}", field.display(), field.raw());
    if let Some(chips) = field.chips() {
        println!("  chips={:?} fragment={:?}", chips.committed, chips.fragment);
    }
    let Some(suggestions) = field.suggestions() else {
        return;
    };
    if suggestions.is_loading {
        println!("  loading...");
    }
    if !suggestions.is_open {
        return;
    }
    for (index, item) in suggestions.items.iter().enumerate() {
        let marker = if suggestions.cursor == Some(index) { ">" } else { " " };
        println!("  {marker} [{index}] {item}");
    }
}

#[cfg(test)]
mod tests {
    use r3bl_input_field::assert_eq2;

    use super::*;

    #[test]
    fn test_sink_prints_value_changes_without_logging() {
        let sink = PrintingSink { out: Vec::new() };
        let mut field = InputField::try_new(FieldConfig::mask("99"), sink).unwrap();
        field.handle_keystroke("4");
        field.clear();

        let printed = String::from_utf8(field.into_sink().out).unwrap();
        assert_eq2!(
            printed,
            "  changed to Text(\"4\")\n  changed to Text(\"\")\n  focus requested\n"
        );
    }
}
