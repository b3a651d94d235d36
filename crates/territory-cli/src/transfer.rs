//! # Import, Export, and Template
//!
//! - `import <file.csv>`: Create clients from a CSV file. Bad rows are
//!   listed; good rows still import. Exit code 1 if any row was rejected.
//! - `export [--out <file>]`: Dump both collections as JSON. Defaults to
//!   `territory-data-YYYY-MM-DD.json` in the working directory.
//! - `template [--out <file>]`: Write the CSV import template, or print it
//!   when `--out` is `-`.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::Args;

use territory_store::{
    default_export_file_name, parse_clients, ExportBundle, IMPORT_TEMPLATE,
    IMPORT_TEMPLATE_FILE_NAME,
};

use crate::Context;

/// Arguments for the `territory import` subcommand.
#[derive(Args, Debug)]
pub struct ImportArgs {
    /// CSV file with one client per row.
    pub file: PathBuf,
}

/// Arguments for the `territory export` subcommand.
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Output file. Defaults to territory-data-<today>.json.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Arguments for the `territory template` subcommand.
#[derive(Args, Debug)]
pub struct TemplateArgs {
    /// Output file, or "-" for stdout. Defaults to client-import-template.csv.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

/// Execute the import subcommand.
pub fn run_import(args: &ImportArgs, ctx: &Context) -> Result<u8> {
    let path = ctx.resolve(&args.file);
    let file = std::fs::File::open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    let report =
        parse_clients(file).with_context(|| format!("failed to read {}", path.display()))?;

    let mut book = ctx.load_book()?;
    let outcome = report.commit(&mut book, crate::today());
    if !outcome.imported.is_empty() {
        ctx.save_book(&book)?;
    }

    println!("OK: imported {} client(s)", outcome.imported.len());
    for row in &outcome.rejected {
        println!("REJECTED line {}: {}", row.line, row.reason);
    }
    Ok(if outcome.rejected.is_empty() { 0 } else { 1 })
}

/// Execute the export subcommand.
pub fn run_export(args: &ExportArgs, ctx: &Context) -> Result<u8> {
    let out = match &args.out {
        Some(path) => ctx.resolve(path),
        None => ctx
            .work_dir
            .join(default_export_file_name(crate::today())),
    };

    let book = ctx.load_book()?;
    let bundle = ExportBundle::capture(&book, chrono::Utc::now());
    bundle
        .write_to(&out)
        .with_context(|| format!("failed to export to {}", out.display()))?;

    println!(
        "OK: exported {} client(s) and {} event(s) to {}",
        bundle.clients.len(),
        bundle.events.len(),
        out.display()
    );
    Ok(0)
}

/// Execute the template subcommand.
pub fn run_template(args: &TemplateArgs, ctx: &Context) -> Result<u8> {
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(IMPORT_TEMPLATE_FILE_NAME));

    if out.as_os_str() == "-" {
        print!("{IMPORT_TEMPLATE}");
        return Ok(0);
    }

    let out = ctx.resolve(&out);
    std::fs::write(&out, IMPORT_TEMPLATE)
        .with_context(|| format!("failed to write {}", out.display()))?;
    println!("OK: wrote import template to {}", out.display());
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing;

    #[test]
    fn template_then_import() {
        let (dir, ctx) = testing::context();
        run_template(&TemplateArgs { out: None }, &ctx).unwrap();
        let template = dir.path().join(IMPORT_TEMPLATE_FILE_NAME);
        assert!(template.exists());

        let code = run_import(&ImportArgs { file: template }, &ctx).unwrap();
        assert_eq!(code, 0);

        let book = ctx.load_book().unwrap();
        let names: Vec<_> = book.clients().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Acme Events", "Premier Productions"]);
    }

    #[test]
    fn import_with_rejected_rows_exits_one() {
        let (dir, ctx) = testing::context();
        let path = dir.path().join("clients.csv");
        std::fs::write(
            &path,
            "Client Name,Contact Email,Contact Phone,Assigned Zip Codes (comma-separated),Status\n\
             Good,,,10001,active\n\
             ,,,10002,active\n",
        )
        .unwrap();

        let code = run_import(&ImportArgs { file: path }, &ctx).unwrap();
        assert_eq!(code, 1);
        assert_eq!(ctx.load_book().unwrap().clients().len(), 1);
    }

    #[test]
    fn import_missing_file_fails() {
        let (_dir, ctx) = testing::context();
        let args = ImportArgs {
            file: PathBuf::from("missing.csv"),
        };
        assert!(run_import(&args, &ctx).is_err());
    }

    #[test]
    fn export_writes_default_file_name() {
        let (dir, ctx) = testing::context();
        run_export(&ExportArgs { out: None }, &ctx).unwrap();
        let expected = dir.path().join(default_export_file_name(crate::today()));
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(expected).unwrap()).unwrap();
        assert!(value["clients"].is_array());
        assert!(value["events"].is_array());
        assert!(value["export_date"].is_string());
    }

    #[test]
    fn template_to_stdout() {
        let (dir, ctx) = testing::context();
        let args = TemplateArgs {
            out: Some(PathBuf::from("-")),
        };
        assert_eq!(run_template(&args, &ctx).unwrap(), 0);
        assert!(!dir.path().join("-").exists());
    }
}
