//! Command-line argument definitions for the Waymark CLI.
//!
//! Besides input/output paths, configuration and logging, the arguments
//! can replay a few viewport gestures before rendering, so a snapshot can
//! be exported zoomed, panned or with a node selected.

use std::{fmt, str::FromStr};

use clap::Parser;

/// Command-line arguments for the Waymark workflow renderer
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input workflow JSON file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Zoom button presses to apply; negative values zoom out
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    pub zoom_steps: i32,

    /// Pan offset as `X,Y`
    #[arg(long, allow_hyphen_values = true)]
    pub pan: Option<Pan>,

    /// Id of a node to render as selected
    #[arg(long)]
    pub select: Option<String>,
}

/// A pan offset given on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pan {
    pub x: f32,
    pub y: f32,
}

impl FromStr for Pan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected `X,Y`, got `{s}`"))?;

        let parse = |value: &str| {
            value
                .trim()
                .parse::<f32>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| format!("`{}` is not a finite number", value.trim()))
        };

        Ok(Self {
            x: parse(x)?,
            y: parse(y)?,
        })
    }
}

impl fmt::Display for Pan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pan() {
        assert_eq!("40,-25".parse::<Pan>(), Ok(Pan { x: 40.0, y: -25.0 }));
        assert_eq!(" 1.5 , 2 ".parse::<Pan>(), Ok(Pan { x: 1.5, y: 2.0 }));
        assert!("40".parse::<Pan>().is_err());
        assert!("a,b".parse::<Pan>().is_err());
        assert!("inf,0".parse::<Pan>().is_err());
    }

    #[test]
    fn test_parse_args() {
        let args = Args::try_parse_from([
            "waymark",
            "close.json",
            "--zoom-steps",
            "-3",
            "--pan",
            "-10,20",
            "--select",
            "stage-2",
        ])
        .expect("valid arguments");

        assert_eq!(args.output, "out.svg");
        assert_eq!(args.zoom_steps, -3);
        assert_eq!(args.pan, Some(Pan { x: -10.0, y: 20.0 }));
        assert_eq!(args.select.as_deref(), Some("stage-2"));
        assert_eq!(args.log_level, "info");
    }
}
