use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::data::filter::FilterSelection;
use crate::data::loader::DataPaths;
use crate::data::model::FieldValue;

/// Explore customer credit-card transactions by zip code, month and year.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub data: DataArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Args, Debug, Clone)]
pub struct DataArgs {
    /// Customer CSV with SSN, CUST_ZIP and CUST_STATE columns
    #[arg(long, global = true, default_value = "cleaned_files/cleaned_customer.csv")]
    pub customers: PathBuf,

    /// Transaction CSV with CUST_SSN, TIMEID and TRANSACTION_TYPE columns
    #[arg(long, global = true, default_value = "cleaned_files/cleaned_credit.csv")]
    pub transactions: PathBuf,
}

impl DataArgs {
    pub fn paths(&self) -> DataPaths {
        DataPaths {
            customers: self.customers.clone(),
            transactions: self.transactions.clone(),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the interactive viewer (default)
    View,
    /// Print matching transactions as JSON, newest first
    Query(QueryArgs),
    /// Print the zip, month, year, type and state pick lists as JSON
    Candidates,
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct QueryArgs {
    #[arg(long)]
    pub zip: Option<String>,

    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    #[arg(long)]
    pub year: Option<i32>,

    /// Print at most this many rows
    #[arg(long)]
    pub limit: Option<usize>,
}

impl QueryArgs {
    /// Zip text is typed the same way as CSV cells so `10001` matches an
    /// integer zip column.
    pub fn selection(&self) -> FilterSelection {
        FilterSelection {
            zip: self.zip.as_deref().map(FieldValue::parse),
            month: self.month,
            year: self.year,
        }
    }
}
