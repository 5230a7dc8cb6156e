//! Clap derive structures for the `depot` CLI.
//!
//! Defines the command tree, global flags, and shared argument groups.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// depot -- command-line client for warehouse and inventory servers
#[derive(Debug, Parser)]
#[command(
    name = "depot",
    version,
    about = "Browse and manage warehouse inventory from the command line",
    long_about = "A CLI for Depot warehouse servers.\n\n\
        Lists addresses, customers, inventory and catalog records, runs the\n\
        inventory activity report, downloads exports, and creates records\n\
        from JSON files.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Server profile to use
    #[arg(long, short = 'p', env = "DEPOT_PROFILE", global = true)]
    pub profile: Option<String>,

    /// API base URL (overrides profile)
    #[arg(long, short = 's', env = "DEPOT_SERVER", global = true)]
    pub server: Option<String>,

    /// Bearer token (overrides profile)
    #[arg(long, env = "DEPOT_TOKEN", global = true, hide_env = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "DEPOT_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "DEPOT_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "DEPOT_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List and create customer addresses
    #[command(alias = "addr")]
    Addresses(AddressesArgs),

    /// List and create customers
    #[command(alias = "cust")]
    Customers(CustomersArgs),

    /// Inventory summary, lot details, and summary export
    #[command(alias = "inv")]
    Inventory(InventoryArgs),

    /// Inventory activity report and export
    Reports(ReportsArgs),

    /// BOMs, SKUs, and the batch registry
    Catalog(CatalogArgs),

    /// Query a lookup (dropdown) source
    Lookup(LookupArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared Arguments ─────────────────────────────────────────────────

/// Paging, sorting, and keyword search shared by every list command.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Records per page (defaults to the profile's page size)
    #[arg(long, short = 'l')]
    pub limit: Option<u32>,

    /// Field to sort by (server field name, e.g. "createdAt")
    #[arg(long)]
    pub sort_by: Option<String>,

    /// Sort direction
    #[arg(long, default_value = "asc", requires = "sort_by")]
    pub sort_order: SortOrderArg,

    /// Free-text search
    #[arg(long)]
    pub keyword: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortOrderArg {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormatArg {
    Csv,
    Pdf,
    Txt,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum CreateModeArg {
    /// Exactly one record
    Single,
    /// One or more records
    Bulk,
}

/// Where and how to write an export.
#[derive(Debug, Args)]
pub struct ExportArgs {
    /// File format
    #[arg(long, short = 'f', default_value = "csv")]
    pub format: ExportFormatArg,

    /// Directory to write the file into
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

/// Creation from a JSON file (one object or an array).
#[derive(Debug, Args)]
pub struct CreateArgs {
    /// JSON file with the record(s) to create
    #[arg(long, short = 'F')]
    pub from_file: PathBuf,

    /// Single requires exactly one record; bulk takes any number
    #[arg(long, default_value = "bulk")]
    pub mode: CreateModeArg,

    /// Fetch the first page of the list again after creating
    #[arg(long)]
    pub refresh: bool,
}

// ── Addresses ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct AddressesArgs {
    #[command(subcommand)]
    pub command: AddressesCommand,
}

#[derive(Debug, Subcommand)]
pub enum AddressesCommand {
    /// List addresses
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Country code
        #[arg(long)]
        country: Option<String>,

        /// Address type (e.g. SHIPPING, BILLING)
        #[arg(long)]
        address_type: Option<String>,

        /// Customer id (repeatable)
        #[arg(long = "customer-id")]
        customer_ids: Vec<String>,
    },

    /// Create addresses from a JSON file
    Create {
        #[command(flatten)]
        create: CreateArgs,

        /// Customer id for every record, or one per record in file order
        #[arg(long = "customer-id")]
        customer_ids: Vec<String>,
    },
}

// ── Customers ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CustomersArgs {
    #[command(subcommand)]
    pub command: CustomersCommand,
}

#[derive(Debug, Subcommand)]
pub enum CustomersCommand {
    /// List customers
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Customer status (e.g. ACTIVE)
        #[arg(long)]
        status: Option<String>,

        /// Country code
        #[arg(long)]
        country: Option<String>,
    },

    /// Create customers from a JSON file
    Create {
        #[command(flatten)]
        create: CreateArgs,
    },
}

// ── Inventory ────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InventoryArgs {
    #[command(subcommand)]
    pub command: InventoryCommand,
}

#[derive(Debug, Args)]
pub struct InventoryFilterArgs {
    /// Warehouse id (repeatable)
    #[arg(long = "warehouse-id")]
    pub warehouse_ids: Vec<String>,

    /// Customer id (repeatable)
    #[arg(long = "customer-id")]
    pub customer_ids: Vec<String>,

    /// SKU code base
    #[arg(long)]
    pub sku_code_base: Option<String>,

    /// Only rows with stock on hand
    #[arg(long)]
    pub in_stock_only: bool,
}

#[derive(Debug, Subcommand)]
pub enum InventoryCommand {
    /// Stock per SKU and warehouse
    Summary {
        #[command(flatten)]
        list: ListArgs,

        #[command(flatten)]
        filters: InventoryFilterArgs,
    },

    /// Lot-level details of one summary row
    Details {
        /// Item id from the summary
        item_id: String,

        #[command(flatten)]
        list: ListArgs,
    },

    /// Download the summary as a file
    Export {
        #[command(flatten)]
        list: ListArgs,

        #[command(flatten)]
        filters: InventoryFilterArgs,

        #[command(flatten)]
        export: ExportArgs,
    },
}

// ── Reports ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ReportsArgs {
    #[command(subcommand)]
    pub command: ReportsCommand,
}

#[derive(Debug, Args)]
pub struct ActivityFilterArgs {
    /// First day (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub from: Option<NaiveDate>,

    /// Last day (YYYY-MM-DD, inclusive)
    #[arg(long)]
    pub to: Option<NaiveDate>,

    /// Warehouse id (repeatable)
    #[arg(long = "warehouse-id")]
    pub warehouse_ids: Vec<String>,

    /// Customer id (repeatable)
    #[arg(long = "customer-id")]
    pub customer_ids: Vec<String>,

    /// Activity type (repeatable)
    #[arg(long = "activity-type")]
    pub activity_types: Vec<String>,

    /// Lot number
    #[arg(long)]
    pub lot_number: Option<String>,

    /// Batch number
    #[arg(long)]
    pub batch_number: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum ReportsCommand {
    /// Inventory activity log
    Activity {
        #[command(flatten)]
        list: ListArgs,

        #[command(flatten)]
        filters: ActivityFilterArgs,

        /// Collapse rows of the same movement, summing quantities
        #[arg(long)]
        merge: bool,
    },

    /// Download the activity log as a file
    Export {
        #[command(flatten)]
        list: ListArgs,

        #[command(flatten)]
        filters: ActivityFilterArgs,

        #[command(flatten)]
        export: ExportArgs,
    },
}

// ── Catalog ──────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CatalogArgs {
    #[command(subcommand)]
    pub command: CatalogCommand,
}

#[derive(Debug, Subcommand)]
pub enum CatalogCommand {
    /// Bills of materials
    Boms {
        #[command(flatten)]
        list: ListArgs,

        #[arg(long)]
        status: Option<String>,
    },

    /// Stock keeping units
    Skus {
        #[command(flatten)]
        list: ListArgs,

        #[arg(long)]
        status: Option<String>,
    },

    /// Registered batches
    Batches {
        #[command(flatten)]
        list: ListArgs,

        #[arg(long)]
        status: Option<String>,
    },
}

// ── Lookup ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct LookupArgs {
    /// Lookup source
    pub kind: LookupKindArg,

    /// Search keyword
    pub keyword: Option<String>,

    /// Number of pages to load
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LookupKindArg {
    Customers,
    Warehouses,
    BatchRegistry,
    LotAdjustmentTypes,
    SkuCodeBases,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile with guided setup
    Init,

    /// Display the configuration with secrets redacted
    Show,

    /// Print the config file location
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Store an API token in the system keyring
    SetToken,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
