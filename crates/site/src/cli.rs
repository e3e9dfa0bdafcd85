use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "sao-site", about = "Browse the SAO pricing tiers, features and offers")]
pub struct Cli {
    /// Preference file holding bookmarks and likes.
    #[arg(long, env = "SAO_PREFS_PATH", global = true)]
    pub prefs: Option<PathBuf>,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Feature marketplace with category, text and price filters.
    Features {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, short)]
        query: Option<String>,
        #[arg(long)]
        min: Option<u64>,
        #[arg(long)]
        max: Option<u64>,
        /// Named price range, e.g. "Under £10k".
        #[arg(long, conflicts_with_all = ["min", "max"])]
        preset: Option<String>,
    },
    /// Pricing tiers.
    Tiers {
        /// Also list the downsell tiers.
        #[arg(long)]
        downsell: bool,
    },
    /// Side-by-side comparison of up to three tiers.
    Compare { tiers: Vec<String> },
    /// Offer library, optionally one kind and one of its categories.
    Offers {
        kind: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Search tiers, features and offers.
    Search {
        query: String,
        #[arg(long)]
        json: bool,
    },
    /// Price an ad hoc set of features.
    Bundle {
        #[arg(required = true)]
        features: Vec<String>,
    },
    /// Upgrade paths and credits.
    Upgrades {
        from: Option<String>,
        /// Purchase date, to work out the credit deadline.
        #[arg(long)]
        purchased: Option<NaiveDate>,
        #[arg(long, requires = "purchased")]
        today: Option<NaiveDate>,
        /// Days since purchase, to list the feature upsells now due.
        #[arg(long, requires = "from")]
        days: Option<u32>,
    },
    /// Support tiers and service levels.
    Support,
    /// Coaching tiers.
    Coaching,
    /// Catalog totals and recurring revenue ceiling.
    Summary,
    /// Toggle a bookmark on any catalog entry.
    Bookmark { id: String },
    /// Toggle a like on any catalog entry.
    Like { id: String },
    /// Bookmarked and liked entries.
    Saved {
        /// Replace an unreadable preference file with empty lists.
        #[arg(long)]
        reset: bool,
    },
    /// Check catalog consistency and audit upgrade credits.
    Validate {
        /// Fail when the credit audit reports anything.
        #[arg(long)]
        strict: bool,
    },
}
