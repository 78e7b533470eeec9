//! Handlers for the conversion and the config/ramp subcommands.

use std::path::Path;

use super::args::{Args, ConfigAction};
use crate::ascii::SYMBOL_RAMP;
use crate::config::{ConfigError, ConversionParams, CONFIG_TEMPLATE};
use crate::converter::{Converter, ConverterState};
use crate::error::ConvertError;

/// Run a conversion described by the command-line arguments.
///
/// With `--config`, the config file supplies every parameter and must resolve
/// completely; the size options are rejected alongside it at parse time. Otherwise `--input` and `--output` are used together with the
/// size options.
pub fn run_conversion(args: &Args) -> Result<(), ConvertError> {
    let mut converter = match &args.config {
        Some(config_path) => converter_from_config(config_path)?,
        None => {
            let input = args.input.clone().unwrap_or_default();
            let output = args.output.clone().unwrap_or_default();
            let mut converter =
                Converter::new(input, output, args.symbols, args.width, args.height);
            converter.keep_aspect_ratio(!args.no_keep_ratio);
            converter.init()?;
            converter
        }
    };

    converter.process_image()
}

fn converter_from_config(path: &Path) -> Result<Converter, ConvertError> {
    let mut converter = Converter::from_params(ConversionParams::default());
    match converter.init_from_config(path)? {
        ConverterState::Initialized => Ok(converter),
        _ => Err(ConvertError::ConfigUnavailable {
            path: path.to_path_buf(),
            source: ConfigError::Incomplete {
                missing: converter.params().missing_fields(),
            },
        }),
    }
}

/// Print the symbol ramp with its indices.
pub fn print_ramp() {
    println!("Symbol ramp ({} symbols, darkest first):", SYMBOL_RAMP.len());
    for (i, symbol) in SYMBOL_RAMP.iter().enumerate() {
        println!("  {:>2}: '{}'", i, symbol);
    }
}

/// Handle config subcommand actions.
pub fn handle_config_action(action: ConfigAction) -> Result<(), String> {
    match action {
        ConfigAction::Show { path } => {
            let params = ConversionParams::load(&path)
                .map_err(|e| format!("Unable to load config '{}': {}", path.display(), e))?;

            println!("Config file: {}", path.display());
            println!("{}", params);
            let missing = params.missing_fields();
            if missing.is_empty() {
                println!("Status: resolved");
            } else {
                println!("Status: unresolved (missing {})", missing.join(", "));
            }
            Ok(())
        }
        ConfigAction::Init { path } => {
            if path.exists() {
                return Err(format!(
                    "Config file already exists: {}\nUse 'ascii-converter config show {}' to view it.",
                    path.display(),
                    path.display()
                ));
            }

            // Create parent directories if needed
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Error creating config directory: {}", e))?;
            }

            std::fs::write(&path, CONFIG_TEMPLATE)
                .map_err(|e| format!("Error writing config file: {}", e))?;

            println!("Created config file: {}", path.display());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_config_init_then_show() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.txt");

        handle_config_action(ConfigAction::Init { path: path.clone() }).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), CONFIG_TEMPLATE);

        handle_config_action(ConfigAction::Show { path: path.clone() }).unwrap();
    }

    #[test]
    fn test_config_init_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.txt");
        std::fs::write(&path, "keep me").unwrap();

        let err = handle_config_action(ConfigAction::Init { path: path.clone() }).unwrap_err();
        assert!(err.contains("already exists"));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[test]
    fn test_config_show_missing_file() {
        let err = handle_config_action(ConfigAction::Show {
            path: "/nonexistent-dir/config.txt".into(),
        })
        .unwrap_err();
        assert!(err.contains("Unable to load config"));
    }

    fn write_png(path: &Path, width: u32, height: u32) {
        image::RgbImage::from_fn(width, height, |x, _| {
            let v = (x * 255 / width) as u8;
            image::Rgb([v, v, v])
        })
        .save(path)
        .unwrap();
    }

    fn output_rows(extra: &[&str]) -> usize {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.txt");
        write_png(&input, 100, 50);

        let input_arg = input.display().to_string();
        let output_arg = output.display().to_string();
        let mut argv = vec![
            "ascii-converter",
            "-i",
            input_arg.as_str(),
            "-o",
            output_arg.as_str(),
            "-x",
            "10",
            "-y",
            "3",
        ];
        argv.extend_from_slice(extra);
        run_conversion(&Args::parse_from(argv)).unwrap();

        std::fs::read_to_string(&output).unwrap().lines().count()
    }

    #[test]
    fn test_run_conversion_keeps_ratio_by_default() {
        // 100x50 at width 10 gives round(10 * 50 / 100) = 5 rows
        assert_eq!(output_rows(&[]), 5);
    }

    #[test]
    fn test_run_conversion_no_keep_ratio_uses_height() {
        assert_eq!(output_rows(&["--no-keep-ratio"]), 3);
    }

    #[test]
    fn test_run_conversion_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.txt");
        let config = dir.path().join("config.txt");
        write_png(&input, 4, 4);
        std::fs::write(
            &config,
            format!(
                "inputFile\n{}\noutputFile\n{}\nsize_x\n2\nsize_y\n2\nnb_symbols\n39\n",
                input.display(),
                output.display()
            ),
        )
        .unwrap();

        let config_arg = config.display().to_string();
        run_conversion(&Args::parse_from(["ascii-converter", "-c", config_arg.as_str()])).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap().lines().count(), 2);
    }

    #[test]
    fn test_run_conversion_missing_image() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("missing.png").display().to_string();
        let output = dir.path().join("out.txt").display().to_string();
        let err = run_conversion(&Args::parse_from(["ascii-converter", "-i", input.as_str(), "-o", output.as_str()]))
            .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn test_incomplete_config_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.txt");
        std::fs::write(&path, "outputFile\nout.txt\n").unwrap();

        let err = converter_from_config(&path).err().unwrap();
        match err {
            ConvertError::ConfigUnavailable {
                source: ConfigError::Incomplete { missing },
                ..
            } => assert!(missing.contains(&"inputFile")),
            other => panic!("Expected incomplete config, got {:?}", other),
        }
        assert!(!dir.path().join("out.txt").exists());
    }
}
