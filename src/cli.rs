// src/cli.rs

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

use crate::config::Config;
use crate::dataset::{self, Record};
use crate::engine::{Slot, ViewEngine};

/// Rowscope: terminal browser for tabular record collections
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional path to the rowscope configuration file
    #[clap(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Data file to browse: a JSON array of objects, or JSON Lines
    #[clap(value_name = "FILE")]
    pub data: Option<PathBuf>,

    /// Suppress TUI auto-launch (e.g., for scripting)
    #[clap(long)]
    pub headless: bool,

    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the column descriptors a data file produces
    Columns {
        file: PathBuf,
    },
    /// Print one page of the derived view
    Page {
        file: PathBuf,

        /// One-based page number
        #[clap(long, default_value_t = 1)]
        page: usize,

        /// Column id the text filter applies to
        #[clap(long, value_name = "ID")]
        filter_column: Option<String>,

        /// Substring the filter column must contain
        #[clap(long, value_name = "TEXT", default_value = "")]
        filter: String,

        /// Column id to sort by
        #[clap(long, value_name = "ID")]
        sort: Option<String>,

        /// Sort descending instead of ascending
        #[clap(long)]
        descending: bool,
    },
}

pub async fn handle_command(command: Commands, config: Arc<Config>) -> Result<()> {
    match command {
        Commands::Columns { file } => {
            let records = dataset::load_records(&file)?;
            let specs =
                dataset::resolve_columns(&records, &config.columns, config.dataset.infer_limit);
            if specs.is_empty() {
                println!("No columns detected.");
                return Ok(());
            }
            for spec in specs {
                let mut capabilities = Vec::new();
                if spec.filterable {
                    capabilities.push("filterable");
                }
                if spec.sortable {
                    capabilities.push("sortable");
                }
                println!("{}\t{}\t[{}]", spec.id, spec.title, capabilities.join(", "));
            }
            Ok(())
        }
        Commands::Page {
            file,
            page,
            filter_column,
            filter,
            sort,
            descending,
        } => {
            let records = dataset::load_records(&file)?;
            let specs =
                dataset::resolve_columns(&records, &config.columns, config.dataset.infer_limit);
            let ids: Vec<String> = specs.iter().map(|spec| spec.id.clone()).collect();

            let mut engine: ViewEngine<Record> = ViewEngine::new(dataset::build_columns(&specs));
            engine.set_records(records);
            if let Some(id) = filter_column {
                engine.set_filter_column(&id);
            }
            engine.set_filter_text(filter);
            if let Some(id) = sort {
                engine.toggle_order(&id);
                if descending {
                    engine.toggle_order(&id);
                }
            }
            engine.set_page(page);

            println!("{}", ids.join("\t"));
            for slot in engine.visible_page().slots() {
                match slot {
                    Slot::Row(record) => {
                        let cells: Vec<String> =
                            ids.iter().map(|id| dataset::cell_text(record, id)).collect();
                        println!("{}", cells.join("\t"));
                    }
                    Slot::Placeholder | Slot::Loading => println!("-"),
                }
            }
            println!(
                "page {}/{} ({} records)",
                engine.active_page() + 1,
                engine.total_pages(),
                engine.view_len()
            );
            Ok(())
        }
    }
}
