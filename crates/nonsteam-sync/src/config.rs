//! Command-line configuration.
//!
//! Configuration can be provided via:
//! - CLI arguments (`--userdata`, `--shortcuts-file`, `--dry-run`)
//! - Environment variables (`NONSTEAM_USERDATA`, `NONSTEAM_SHORTCUTS_FILE`)
//!
//! The shortcuts document is located at `<userdata>/config/shortcuts.vdf`
//! unless `--shortcuts-file` names it directly.
//!
//! # Example
//!
//! ```no_run
//! use nonsteam_sync::SyncConfig;
//!
//! let config = SyncConfig::from_args();
//! let path = config.shortcuts_path().expect("Invalid configuration");
//! println!("Shortcuts document: {}", path.display());
//! ```

use crate::error::ConfigError;
use clap::{Parser, Subcommand};
use nonsteam_crc::CrcAlgorithm;
use std::path::PathBuf;

/// Directory under the userdata profile holding `shortcuts.vdf`
pub const CONFIG_DIR: &str = "config";

/// File name of the shortcuts document
pub const SHORTCUTS_FILE: &str = "shortcuts.vdf";

/// Configuration loaded from CLI args and environment variables.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "nonsteam-sync",
    about = "Create and update non-Steam game shortcuts",
    version
)]
pub struct SyncConfig {
    /// Steam userdata profile directory (e.g. `~/.steam/steam/userdata/<id>`)
    #[arg(long, global = true, env = "NONSTEAM_USERDATA")]
    pub userdata: Option<PathBuf>,

    /// Explicit path to shortcuts.vdf, overrides `--userdata`
    #[arg(long, global = true, env = "NONSTEAM_SHORTCUTS_FILE")]
    pub shortcuts_file: Option<PathBuf>,

    /// Report changes without writing the shortcuts document
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands of the `nonsteam-sync` binary.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List shortcuts with their launch URLs
    List,

    /// Create or update a single shortcut
    Add {
        /// Display name, used as the shortcut's identity
        name: String,

        /// Executable path (or URL with `--url`)
        exe: String,

        /// Working directory, defaults to the executable's directory
        #[arg(long)]
        start_dir: Option<String>,

        /// Extra command-line arguments
        #[arg(long)]
        launch_options: Option<String>,

        /// Icon path
        #[arg(long)]
        icon: Option<String>,

        /// Treat `exe` as a URL target: no path resolution, no start directory
        #[arg(long)]
        url: bool,
    },

    /// Create or update every shortcut described in a JSON entries file
    Sync {
        /// JSON array of entries
        entries: PathBuf,
    },

    /// Print the launch URL for an executable and display name
    Url {
        /// Executable exactly as stored in the shortcut
        exe: String,

        /// Display name
        name: String,

        /// Wrap `exe` in double quotes first, as Steam stores it
        #[arg(long)]
        quote: bool,
    },

    /// Compute a CRC over a string
    Crc {
        /// Input text
        input: String,

        /// Algorithm to use
        #[arg(long, default_value = "table-driven")]
        algorithm: CrcAlgorithm,

        /// Register width in bits
        #[arg(long, default_value_t = 32)]
        width: u32,

        /// Generator polynomial, decimal or `0x` hex
        #[arg(long, default_value = "0x04C11DB7", value_parser = parse_u64)]
        poly: u64,

        /// Reflect input bytes
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        reflect_in: bool,

        /// Initial register value, decimal or `0x` hex
        #[arg(long, default_value = "0xFFFFFFFF", value_parser = parse_u64)]
        xor_in: u64,

        /// Reflect the final register
        #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
        reflect_out: bool,

        /// Final XOR value, decimal or `0x` hex
        #[arg(long, default_value = "0xFFFFFFFF", value_parser = parse_u64)]
        xor_out: u64,
    },
}

impl Command {
    /// Whether the command reads or writes the shortcuts document
    #[must_use]
    pub const fn needs_document(&self) -> bool {
        matches!(self, Self::List | Self::Add { .. } | Self::Sync { .. })
    }
}

impl SyncConfig {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Resolve the shortcuts document path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Neither `--shortcuts-file` nor `--userdata` is set
    /// - The userdata directory has no `config` subdirectory
    pub fn shortcuts_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.shortcuts_file {
            return Ok(path.clone());
        }

        let Some(userdata) = &self.userdata else {
            return Err(ConfigError::MissingRequired(
                "--userdata or --shortcuts-file (NONSTEAM_USERDATA / NONSTEAM_SHORTCUTS_FILE)"
                    .to_string(),
            ));
        };

        let config_dir = userdata.join(CONFIG_DIR);
        if !config_dir.is_dir() {
            return Err(ConfigError::NotConfigured {
                userdata: userdata.clone(),
            });
        }

        Ok(config_dir.join(SHORTCUTS_FILE))
    }

    /// Validate configuration.
    ///
    /// Commands that do not touch the shortcuts document need no paths.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the document path cannot be resolved.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.command.needs_document() {
            self.shortcuts_path()?;
        }
        Ok(())
    }
}

fn parse_u64(value: &str) -> Result<u64, String> {
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|e| format!("invalid number '{value}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> SyncConfig {
        SyncConfig::try_parse_from(std::iter::once("nonsteam-sync").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn test_shortcuts_file_overrides_userdata() {
        let config = parse(&[
            "--userdata",
            "/does/not/exist",
            "--shortcuts-file",
            "/tmp/shortcuts.vdf",
            "list",
        ]);
        assert_eq!(
            config.shortcuts_path().unwrap(),
            PathBuf::from("/tmp/shortcuts.vdf")
        );
    }

    #[test]
    fn test_userdata_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("config")).unwrap();

        let config = parse(&["list", "--userdata", dir.path().to_str().unwrap()]);
        assert_eq!(
            config.shortcuts_path().unwrap(),
            dir.path().join("config").join("shortcuts.vdf")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_userdata_without_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = parse(&["--userdata", dir.path().to_str().unwrap(), "list"]);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }

    #[test]
    fn test_url_needs_no_document() {
        let config = parse(&["url", "\"/usr/bin/retroarch\"", "Super Metroid"]);
        assert!(!config.command.needs_document());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_crc_defaults_are_crc32() {
        let config = parse(&["crc", "123456789"]);
        let Command::Crc {
            algorithm,
            width,
            poly,
            reflect_in,
            xor_in,
            reflect_out,
            xor_out,
            ..
        } = config.command
        else {
            panic!("expected crc command");
        };
        assert_eq!(algorithm, CrcAlgorithm::TableDriven);
        assert_eq!(width, 32);
        assert_eq!(poly, 0x04C1_1DB7);
        assert!(reflect_in && reflect_out);
        assert_eq!(xor_in, 0xFFFF_FFFF);
        assert_eq!(xor_out, 0xFFFF_FFFF);
    }

    #[test]
    fn test_crc_options() {
        let config = parse(&[
            "crc",
            "abc",
            "--algorithm",
            "bbf",
            "--width",
            "16",
            "--poly",
            "4129",
            "--reflect-in",
            "false",
        ]);
        let Command::Crc {
            algorithm,
            poly,
            reflect_in,
            ..
        } = config.command
        else {
            panic!("expected crc command");
        };
        assert_eq!(algorithm, CrcAlgorithm::BitByBitFast);
        assert_eq!(poly, 0x1021);
        assert!(!reflect_in);
    }

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64("0x1D"), Ok(0x1D));
        assert_eq!(parse_u64("0X1d"), Ok(0x1D));
        assert_eq!(parse_u64("29"), Ok(29));
        assert!(parse_u64("0xZZ").is_err());
    }
}
