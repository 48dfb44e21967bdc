//! Dispatch of parsed commands onto the ordering service.

use std::io::Write;

use tracing::debug;

use super::{AdminAuth, Cli, CliError, Command, CustomerAuth, MenuCommand, OrderCommand, PromoCommand, render};
use crate::domain::ports::{KeyValueStore, LoginService};
use crate::domain::{EateryError, EateryService, MenuFilter, OrderId, PromoDraft};

/// Run one parsed command against `service`, writing the outcome to `out`.
///
/// # Errors
///
/// Returns [`CliError::Domain`] when the service rejects the command and
/// [`CliError::Output`] when `out` cannot be written.
pub fn run<S, L, W>(cli: Cli, service: &mut EateryService<S, L>, out: &mut W) -> Result<(), CliError>
where
    S: KeyValueStore,
    L: LoginService,
    W: Write,
{
    debug!(command = ?cli.command, "dispatching command");
    match cli.command {
        Command::Menu(command) => menu(command, service, out),
        Command::Promo(command) => promo(command, service, out),
        Command::Order(command) => order(command, service, out),
    }
}

fn login_admin<S, L>(service: &mut EateryService<S, L>, auth: &AdminAuth) -> Result<(), EateryError>
where
    S: KeyValueStore,
    L: LoginService,
{
    let user = service.login(&auth.email, &auth.password)?;
    if user.is_admin() {
        Ok(())
    } else {
        Err(EateryError::forbidden("administrator credentials were not accepted"))
    }
}

fn sign_up<S, L>(service: &mut EateryService<S, L>, customer: &CustomerAuth) -> Result<(), EateryError>
where
    S: KeyValueStore,
    L: LoginService,
{
    service.signup(&customer.name, &customer.email).map(|_| ())
}

fn menu<S, L, W>(command: MenuCommand, service: &mut EateryService<S, L>, out: &mut W) -> Result<(), CliError>
where
    S: KeyValueStore,
    L: LoginService,
    W: Write,
{
    match command {
        MenuCommand::List { category, search } => {
            let filter = match (category, search) {
                (Some(category), _) => MenuFilter::Category(category),
                (None, Some(query)) => MenuFilter::Search(query),
                (None, None) => MenuFilter::All,
            };
            render::menu(out, &service.list_dishes(&filter))?;
        }
        MenuCommand::Tagged { tag } => {
            let entries = service.dishes_tagged(tag);
            if entries.is_empty() {
                writeln!(out, "No {tag} dishes yet.")?;
            }
            for entry in &entries {
                render::entry(out, entry)?;
            }
        }
        MenuCommand::Categories => {
            for category in service.categories() {
                writeln!(out, "{category}")?;
            }
        }
        MenuCommand::Add { auth, dish } => {
            login_admin(service, &auth)?;
            let position = service.add_dish(dish.into())?;
            writeln!(out, "Added dish #{position}.")?;
        }
        MenuCommand::Edit { auth, index, dish } => {
            login_admin(service, &auth)?;
            service.update_dish(index, dish.into())?;
            writeln!(out, "Updated dish #{index}.")?;
        }
        MenuCommand::Delete { auth, index } => {
            login_admin(service, &auth)?;
            let removed = service.delete_dish(index)?;
            writeln!(out, "Deleted {}.", removed.name())?;
        }
    }
    Ok(())
}

fn promo<S, L, W>(command: PromoCommand, service: &mut EateryService<S, L>, out: &mut W) -> Result<(), CliError>
where
    S: KeyValueStore,
    L: LoginService,
    W: Write,
{
    match command {
        PromoCommand::List => render::promos(out, service.promos())?,
        PromoCommand::Add {
            auth,
            title,
            description,
            image,
        } => {
            login_admin(service, &auth)?;
            let position = service.add_promo(PromoDraft {
                title,
                description,
                image_url: image,
            })?;
            writeln!(out, "Added promo #{position}.")?;
        }
        PromoCommand::Delete { auth, index } => {
            login_admin(service, &auth)?;
            let removed = service.delete_promo(index)?;
            writeln!(out, "Deleted {}.", removed.title())?;
        }
    }
    Ok(())
}

fn order<S, L, W>(command: OrderCommand, service: &mut EateryService<S, L>, out: &mut W) -> Result<(), CliError>
where
    S: KeyValueStore,
    L: LoginService,
    W: Write,
{
    match command {
        OrderCommand::Place {
            customer,
            dishes,
            payment,
        } => {
            sign_up(service, &customer)?;
            for index in dishes {
                service.add_to_cart(index)?;
            }
            let receipt = service.checkout(&payment)?;
            render::receipt(out, &receipt)?;
        }
        OrderCommand::List { customer } => {
            sign_up(service, &customer)?;
            render::orders(out, &service.my_orders()?)?;
        }
        OrderCommand::Search { auth, query } => {
            login_admin(service, &auth)?;
            render::orders(out, &service.search_orders(&query)?)?;
        }
        OrderCommand::Status { auth, id, status } => {
            login_admin(service, &auth)?;
            let id = OrderId::new(id);
            if service.set_order_status(id, status.clone())? {
                writeln!(out, "Order {id} is now {status}.")?;
            } else {
                writeln!(out, "No order with id {id}; nothing changed.")?;
            }
        }
    }
    Ok(())
}
