//! Plain-text rendering of domain values.

use std::io::{self, Write};

use crate::domain::{Dish, DishTag, MenuEntry, MenuSection, Order, Promo, Receipt};

fn tag_suffix(dish: &Dish) -> String {
    if dish.tags().is_empty() {
        return String::new();
    }
    let labels: Vec<&str> = dish.tags().iter().map(DishTag::as_str).collect();
    format!(" [{}]", labels.join(", "))
}

pub(super) fn entry(out: &mut impl Write, item: &MenuEntry<'_>) -> io::Result<()> {
    let dish = item.dish;
    writeln!(
        out,
        "  #{} {} - ₱{}{}",
        item.position,
        dish.name(),
        dish.price(),
        tag_suffix(dish)
    )?;
    if !dish.description().is_empty() {
        writeln!(out, "      {}", dish.description())?;
    }
    Ok(())
}

pub(super) fn menu(out: &mut impl Write, sections: &[MenuSection<'_>]) -> io::Result<()> {
    if sections.is_empty() {
        return writeln!(out, "No dishes found.");
    }
    for section in sections {
        writeln!(out, "{}", section.category)?;
        for item in &section.entries {
            entry(out, item)?;
        }
    }
    Ok(())
}

pub(super) fn promos(out: &mut impl Write, promos: &[Promo]) -> io::Result<()> {
    if promos.is_empty() {
        return writeln!(out, "No promos yet.");
    }
    for (position, promo) in promos.iter().enumerate() {
        writeln!(out, "#{position} {}", promo.title())?;
        if !promo.description().is_empty() {
            writeln!(out, "    {}", promo.description())?;
        }
    }
    Ok(())
}

pub(super) fn orders(out: &mut impl Write, orders: &[&Order]) -> io::Result<()> {
    if orders.is_empty() {
        return writeln!(out, "No orders found.");
    }
    for order in orders {
        let names: Vec<&str> = order.items().iter().map(Dish::name).collect();
        writeln!(
            out,
            "#{} {} | {} | ₱{} | {} | {}",
            order.id(),
            order.customer(),
            names.join(", "),
            order.total(),
            order.payment_method(),
            order.status()
        )?;
    }
    Ok(())
}

pub(super) fn receipt(out: &mut impl Write, receipt: &Receipt) -> io::Result<()> {
    writeln!(out, "{receipt}")
}
