use std::path::PathBuf;

use clap::Args;

use crate::{
    schema::catalog::CatalogFile,
    util::{self, Output},
};

#[derive(Debug, Clone, Args)]
pub(crate) struct CatalogArg {
    /// Strategy catalog JSON file (defaults to the built-in catalog)
    #[arg(long)]
    pub catalog: Option<PathBuf>,

    /// Print the catalog as JSON, in the format accepted by `--catalog`
    #[arg(long)]
    pub json: bool,
}

pub(crate) fn run(arg: &CatalogArg) -> anyhow::Result<()> {
    let catalog = util::load_catalog(arg.catalog.as_deref())?;
    if arg.json {
        Output::save_json(&CatalogFile::from_catalog(&catalog), None)?;
    } else {
        super::table::print_catalog(&catalog);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_prints_builtin_catalog() {
        let arg = CatalogArg {
            catalog: None,
            json: false,
        };
        run(&arg).unwrap();
    }

    #[test]
    fn test_run_rejects_duplicate_ids() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{"strategies": [
                {"id": 2, "name": "Ask Question", "label": null},
                {"id": 2, "name": "Retry", "label": null}
            ]}"#,
        )
        .unwrap();

        let arg = CatalogArg {
            catalog: Some(path),
            json: true,
        };
        let err = run(&arg).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid catalog file"));
    }
}
