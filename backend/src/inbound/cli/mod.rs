//! Command-line inbound adapter.
//!
//! Each invocation loads the stored snapshot, opens a session when the
//! command needs one, runs a single operation, and prints the outcome. The
//! cart lives only for the invocation, so `order place` fills and checks out
//! a cart in one go.

use clap::{Args, Parser, Subcommand};

use crate::domain::{DishDraft, DishTag, OrderStatus};

mod error;
mod render;
mod run;

pub use error::{CliError, exit_code_for};
pub use run::run;

/// `eatery` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "eatery",
    about = "Menu, cart, and order ledger for Elha's Eatery",
    version
)]
pub struct Cli {
    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level command groups.
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Browse or administer dishes.
    #[command(subcommand)]
    Menu(MenuCommand),
    /// Browse or administer promos.
    #[command(subcommand)]
    Promo(PromoCommand),
    /// Place, track, and manage orders.
    #[command(subcommand)]
    Order(OrderCommand),
}

/// Admin login flags.
#[derive(Debug, Clone, Args)]
pub struct AdminAuth {
    /// Administrator email.
    #[arg(long = "admin-email", value_name = "email")]
    pub email: String,
    /// Administrator password.
    #[arg(long = "admin-password", value_name = "password")]
    pub password: String,
}

/// Customer signup flags.
#[derive(Debug, Clone, Args)]
pub struct CustomerAuth {
    /// Name orders are recorded under.
    #[arg(long, value_name = "name")]
    pub name: String,
    /// Contact email.
    #[arg(long, value_name = "email")]
    pub email: String,
}

/// Dish fields shared by `menu add` and `menu edit`.
#[derive(Debug, Clone, Args)]
pub struct DishArgs {
    /// Display name.
    #[arg(long)]
    pub name: String,
    /// Short description.
    #[arg(long, default_value = "")]
    pub description: String,
    /// Whole-peso price.
    #[arg(long, allow_negative_numbers = true)]
    pub price: i64,
    /// Image URL or path.
    #[arg(long, default_value = "")]
    pub image: String,
    /// Menu category.
    #[arg(long)]
    pub category: String,
    /// Home view shelf; repeat for several.
    #[arg(long = "tag", value_name = "featured|popular|new")]
    pub tags: Vec<DishTag>,
}

impl From<DishArgs> for DishDraft {
    fn from(value: DishArgs) -> Self {
        Self {
            name: value.name,
            description: value.description,
            price: value.price,
            image_url: value.image,
            category: value.category,
            tags: value.tags.into_iter().collect(),
        }
    }
}

/// `menu` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum MenuCommand {
    /// List dishes grouped by category.
    List {
        /// Only dishes in this exact category.
        #[arg(long, conflicts_with = "search")]
        category: Option<String>,
        /// Only dishes whose name or description contains this text.
        #[arg(long)]
        search: Option<String>,
    },
    /// List dishes on one home view shelf.
    Tagged {
        /// Shelf to list.
        tag: DishTag,
    },
    /// List categories in menu order.
    Categories,
    /// Add a dish.
    Add {
        /// Administrator credentials.
        #[command(flatten)]
        auth: AdminAuth,
        /// Dish fields.
        #[command(flatten)]
        dish: DishArgs,
    },
    /// Replace the dish at a position.
    Edit {
        /// Administrator credentials.
        #[command(flatten)]
        auth: AdminAuth,
        /// Position shown by `menu list`.
        index: usize,
        /// Dish fields.
        #[command(flatten)]
        dish: DishArgs,
    },
    /// Delete the dish at a position.
    Delete {
        /// Administrator credentials.
        #[command(flatten)]
        auth: AdminAuth,
        /// Position shown by `menu list`.
        index: usize,
    },
}

/// `promo` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum PromoCommand {
    /// List promos.
    List,
    /// Add a promo.
    Add {
        /// Administrator credentials.
        #[command(flatten)]
        auth: AdminAuth,
        /// Headline.
        #[arg(long)]
        title: String,
        /// Teaser copy.
        #[arg(long, default_value = "")]
        description: String,
        /// Image URL or path.
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Delete the promo at a position.
    Delete {
        /// Administrator credentials.
        #[command(flatten)]
        auth: AdminAuth,
        /// Position shown by `promo list`.
        index: usize,
    },
}

/// `order` subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum OrderCommand {
    /// Check out the listed dishes and print a receipt.
    Place {
        /// Customer identity.
        #[command(flatten)]
        customer: CustomerAuth,
        /// Menu position to add to the cart; repeat for several.
        #[arg(long = "dish", value_name = "index", required = true)]
        dishes: Vec<usize>,
        /// Payment method label, e.g. `Pay at Cashier` or `GCash`.
        #[arg(long, default_value = "Pay at Cashier")]
        payment: String,
    },
    /// List the customer's own orders.
    List {
        /// Customer identity.
        #[command(flatten)]
        customer: CustomerAuth,
    },
    /// Search all orders by customer name or order id.
    Search {
        /// Administrator credentials.
        #[command(flatten)]
        auth: AdminAuth,
        /// Text to look for; empty lists everything.
        #[arg(default_value = "")]
        query: String,
    },
    /// Change an order's status.
    Status {
        /// Administrator credentials.
        #[command(flatten)]
        auth: AdminAuth,
        /// Order id.
        id: u64,
        /// New status.
        status: OrderStatus,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn parses_dish_tags() {
        let cli = Cli::try_parse_from([
            "eatery",
            "menu",
            "add",
            "--admin-email",
            "admin@elha.com",
            "--admin-password",
            "admin123",
            "--name",
            "Adobo",
            "--price",
            "150",
            "--category",
            "Mains",
            "--tag",
            "popular",
            "--tag",
            "new",
        ])
        .expect("valid arguments");
        let Command::Menu(MenuCommand::Add { dish, .. }) = cli.command else {
            panic!("expected menu add");
        };
        let draft = DishDraft::from(dish);
        assert!(draft.tags.contains(&DishTag::Popular));
        assert!(draft.tags.contains(&DishTag::New));
    }

    #[rstest]
    fn category_and_search_conflict() {
        let result = Cli::try_parse_from([
            "eatery", "menu", "list", "--category", "Mains", "--search", "pork",
        ]);
        assert!(result.is_err());
    }

    #[rstest]
    fn order_place_requires_a_dish() {
        let result = Cli::try_parse_from([
            "eatery", "order", "place", "--name", "Ana", "--email", "ana@example.com",
        ]);
        assert!(result.is_err());
    }

    #[rstest]
    fn status_parses_labels() {
        let cli = Cli::try_parse_from([
            "eatery",
            "order",
            "status",
            "--admin-email",
            "admin@elha.com",
            "--admin-password",
            "admin123",
            "4",
            "ready",
        ])
        .expect("valid arguments");
        assert!(matches!(
            cli.command,
            Command::Order(OrderCommand::Status {
                id: 4,
                status: OrderStatus::Ready,
                ..
            })
        ));
    }
}
