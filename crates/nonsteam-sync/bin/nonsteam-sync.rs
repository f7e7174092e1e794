//! nonsteam-sync binary entry point.
//!
//! This is a thin wrapper around the nonsteam-sync library that:
//! 1. Initializes logging
//! 2. Parses command-line arguments
//! 3. Validates configuration
//! 4. Runs the selected subcommand
//!
//! For library usage, see the nonsteam-sync crate documentation.

use anyhow::{Context, Result};
use nonsteam_crc::{Crc, CrcParams, launch_url};
use nonsteam_sync::{Command, ShortcutEntry, SyncConfig, storage, sync};

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = SyncConfig::from_args();
    config.validate()?;

    match &config.command {
        Command::List => {
            let path = config.shortcuts_path()?;
            let store = storage::load(&path)?;
            for (name, shortcut) in store.iter() {
                let url = shortcut
                    .launch_url()
                    .with_context(|| format!("shortcut '{name}'"))?;
                println!("{name}\t{url}");
            }
        }
        Command::Add {
            name,
            exe,
            start_dir,
            launch_options,
            icon,
            url,
        } => {
            let entry = ShortcutEntry {
                name: name.clone(),
                exe: exe.clone(),
                start_dir: start_dir.clone(),
                launch_options: launch_options.clone(),
                icon: icon.clone(),
                url: *url,
                extra: None,
            };
            let path = config.shortcuts_path()?;
            let report = sync::sync_file(&path, &[entry], config.dry_run)?;
            println!("{report}");
        }
        Command::Sync { entries } => {
            let entries = sync::load_entries(entries)?;
            let path = config.shortcuts_path()?;
            let report = sync::sync_file(&path, &entries, config.dry_run)?;
            println!("{report}");
        }
        Command::Url { exe, name, quote } => {
            let exe = if *quote {
                format!("\"{exe}\"")
            } else {
                exe.clone()
            };
            println!("{}", launch_url(&exe, name));
        }
        Command::Crc {
            input,
            algorithm,
            width,
            poly,
            reflect_in,
            xor_in,
            reflect_out,
            xor_out,
        } => {
            let params =
                CrcParams::new(*width, *poly, *reflect_in, *xor_in, *reflect_out, *xor_out)?;
            let crc = Crc::new(params);
            let value = crc.checksum(*algorithm, input.as_bytes());
            let digits = params.width().div_ceil(4) as usize;
            println!("0x{value:0digits$x}");
        }
    }

    Ok(())
}
