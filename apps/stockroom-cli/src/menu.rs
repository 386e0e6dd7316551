//! # Menu Loop
//!
//! The interactive session over a [`Store`].
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  banner + menu                                                          │
//! │      │                                                                  │
//! │      ├── 1 ──► list active products                                    │
//! │      ├── 2 ──► total quantity of all products                          │
//! │      ├── 3 ──► pick products + quantities ──► Store::checkout          │
//! │      ├── 4 ──► goodbye, Exit::Quit                                     │
//! │      └── ? ──► "Invalid choice", menu again                            │
//! │                                                                         │
//! │  End of input at any prompt ends the session (Exit::EndOfInput)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Input and output are generic so whole sessions run against in-memory
//! buffers in tests.

use std::io::{BufRead, Write};

use stockroom_core::{Cart, Product, SettlementPolicy, Store};
use tracing::{debug, info, warn};

use crate::error::CliError;
use crate::output::Palette;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    /// The user chose "Quit".
    Quit,
    /// Input was closed.
    EndOfInput,
}

/// Result of one menu action.
enum Flow {
    Continue,
    Exit(Exit),
}

pub struct Menu<'s, R, W> {
    store: &'s mut Store,
    input: R,
    out: W,
    palette: Palette,
    store_name: String,
}

impl<'s, R: BufRead, W: Write> Menu<'s, R, W> {
    pub fn new(
        store: &'s mut Store,
        input: R,
        out: W,
        palette: Palette,
        store_name: impl Into<String>,
    ) -> Self {
        Self {
            store,
            input,
            out,
            palette,
            store_name: store_name.into(),
        }
    }

    /// Runs the menu until the user quits or input ends.
    pub fn run(&mut self) -> Result<Exit, CliError> {
        loop {
            self.display_menu()?;

            let Some(choice) = self.prompt("Enter your choice (1-4): ")? else {
                return Ok(Exit::EndOfInput);
            };

            let flow = match choice.as_str() {
                "1" => self.list_products()?,
                "2" => self.show_total_quantity()?,
                "3" => self.make_order()?,
                "4" => {
                    let header = self.palette.header("THANK YOU FOR SHOPPING WITH US");
                    writeln!(self.out, "{header}")?;
                    writeln!(self.out, "{}", self.palette.highlight("Goodbye!"))?;
                    Flow::Exit(Exit::Quit)
                }
                other => {
                    debug!(choice = other, "Invalid menu choice");
                    self.warn("Invalid choice. Please enter a number between 1 and 4.")?;
                    Flow::Continue
                }
            };

            if let Flow::Exit(exit) = flow {
                return Ok(exit);
            }
        }
    }

    // -------------------------------------------------------------------------
    // Menu actions
    // -------------------------------------------------------------------------

    fn display_menu(&mut self) -> Result<(), CliError> {
        let banner = self.palette.banner(&self.store_name);
        writeln!(self.out, "\n{banner}")?;
        writeln!(self.out, "{}", self.palette.highlight("Please choose an option:"))?;
        for (number, label) in [
            "List all products in store",
            "Show total amount in store",
            "Make an order",
            "Quit",
        ]
        .iter()
        .enumerate()
        {
            writeln!(self.out, "{}", self.palette.numbered(number + 1, label))?;
        }
        Ok(())
    }

    fn list_products(&mut self) -> Result<Flow, CliError> {
        writeln!(self.out, "{}", self.palette.header("AVAILABLE PRODUCTS"))?;

        let lines: Vec<String> = self
            .store
            .active_products()
            .into_iter()
            .map(Product::show)
            .collect();

        if lines.is_empty() {
            self.warn("No active products available!")?;
        }
        for (index, line) in lines.iter().enumerate() {
            writeln!(self.out, "{}", self.palette.numbered(index + 1, line))?;
        }
        Ok(Flow::Continue)
    }

    fn show_total_quantity(&mut self) -> Result<Flow, CliError> {
        writeln!(self.out, "{}", self.palette.header("STORE INVENTORY"))?;
        let total = self.store.total_quantity();
        writeln!(
            self.out,
            "{} {}",
            self.palette.highlight("Total of"),
            self.palette.bold(&format!("{total} items in store"))
        )?;
        Ok(Flow::Continue)
    }

    fn make_order(&mut self) -> Result<Flow, CliError> {
        // Product numbers refer to this snapshot for the whole order.
        let listing: Vec<String> = self
            .store
            .active_products()
            .into_iter()
            .map(|p| p.id().to_string())
            .collect();

        self.list_products()?;
        if listing.is_empty() {
            return Ok(Flow::Continue);
        }

        let mut cart = Cart::new();
        loop {
            let Some(choice) =
                self.prompt("Enter product number (0 or Enter to finish): ")?
            else {
                return Ok(Flow::Exit(Exit::EndOfInput));
            };
            if choice.is_empty() || choice == "0" {
                break;
            }

            let Ok(number) = choice.parse::<usize>() else {
                self.warn("Invalid input. Please enter a number for the product.")?;
                continue;
            };
            let Some(product) = number
                .checked_sub(1)
                .and_then(|index| listing.get(index))
                .and_then(|id| self.store.get(id))
            else {
                self.warn("Invalid product number. Please try again.")?;
                continue;
            };

            if product.maximum() == Some(1) && cart.contains_named(product.name()) {
                let message = format!(
                    "Warning: '{}' is limited to one per order and is already in your cart. \
                     Please choose another product.",
                    product.name()
                );
                self.warn(&message)?;
                continue;
            }

            let product_id = product.id().to_string();
            let Some(quantity) = self.ask_quantity(&product_id)? else {
                return Ok(Flow::Exit(Exit::EndOfInput));
            };

            let Some(product) = self.store.get(&product_id) else {
                continue;
            };
            if let Err(e) = cart.add(product, quantity) {
                self.warn(&e.to_string())?;
                continue;
            }
            let message = format!("Added {} x {} to your order.", quantity, product.name());
            writeln!(self.out, "{}", self.palette.accent(&message))?;
        }

        if cart.is_empty() {
            self.warn("Order cancelled or empty.")?;
            return Ok(Flow::Continue);
        }

        self.settle(&cart)?;
        Ok(Flow::Continue)
    }

    /// Asks until the quantity is a positive integer the product accepts.
    fn ask_quantity(&mut self, product_id: &str) -> Result<Option<i64>, CliError> {
        loop {
            let Some(product) = self.store.get(product_id) else {
                return Ok(None);
            };
            let question = if product.is_stocked() {
                format!(
                    "Enter quantity for {} (Available: {}): ",
                    product.name(),
                    product.quantity()
                )
            } else {
                format!("Enter quantity for {}: ", product.name())
            };

            let Some(answer) = self.prompt(&question)? else {
                return Ok(None);
            };

            let Ok(quantity) = answer.parse::<i64>() else {
                self.warn("Invalid input for quantity. Please enter a number.")?;
                continue;
            };
            if quantity <= 0 {
                self.warn("Quantity must be a positive number. Please try again.")?;
                continue;
            }

            let checked = self
                .store
                .get(product_id)
                .map(|product| product.check_purchase(quantity));
            match checked {
                Some(Ok(())) => return Ok(Some(quantity)),
                Some(Err(e)) => {
                    self.warn(&format!("{e}. Please try again."))?;
                }
                None => return Ok(None),
            }
        }
    }

    fn settle(&mut self, cart: &Cart) -> Result<(), CliError> {
        match self.store.checkout(cart, SettlementPolicy::NoRollback) {
            Ok(receipt) => {
                info!(
                    receipt_id = %receipt.id,
                    lines = receipt.lines.len(),
                    total = %receipt.total,
                    "Order settled"
                );
                match serde_json::to_string(&receipt) {
                    Ok(json) => debug!(receipt = %json, "Receipt"),
                    Err(e) => warn!(error = %e, "Could not serialize receipt"),
                }

                writeln!(self.out, "{}", self.palette.header("ORDER SUMMARY"))?;
                for line in &receipt.lines {
                    let promotion = line
                        .promotion
                        .as_deref()
                        .map(|name| format!(" ({name})"))
                        .unwrap_or_default();
                    writeln!(
                        self.out,
                        "  {} x {}{}: {}",
                        line.quantity, line.product_name, promotion, line.amount
                    )?;
                }
                writeln!(
                    self.out,
                    "{} {}",
                    self.palette.highlight("Order completed! Total price:"),
                    self.palette.accent(&receipt.total.to_string())
                )?;
            }
            Err(e) => {
                warn!(error = %e, recoverable = e.is_recoverable(), "Order failed");
                self.warn(&format!(
                    "Error during order processing: {e}. Items before the failing one were already charged."
                ))?;
            }
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // I/O helpers
    // -------------------------------------------------------------------------

    /// Prints `question` and reads one trimmed line; `None` on end of input.
    fn prompt(&mut self, question: &str) -> Result<Option<String>, CliError> {
        write!(self.out, "{}", self.palette.highlight(question))?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.out)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn warn(&mut self, message: &str) -> Result<(), CliError> {
        writeln!(self.out, "{}", self.palette.highlight(message))?;
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::load_catalog;
    use std::io::Cursor;

    fn demo_store() -> Store {
        Store::new(load_catalog(None).unwrap())
    }

    /// Runs a scripted session and returns (exit, output).
    fn session(store: &mut Store, script: &str) -> (Exit, String) {
        let mut out = Vec::new();
        let exit = Menu::new(
            store,
            Cursor::new(script.to_string()),
            &mut out,
            Palette::new(false),
            "Best Buy",
        )
        .run()
        .unwrap();
        (exit, String::from_utf8(out).unwrap())
    }

    fn quantity_of(store: &Store, name: &str) -> i64 {
        store.find_by_name(name).unwrap().quantity()
    }

    #[test]
    fn test_quit() {
        let mut store = demo_store();
        let (exit, out) = session(&mut store, "4\n");

        assert_eq!(exit, Exit::Quit);
        assert!(out.contains("BEST BUY"));
        assert!(out.contains("1. List all products in store"));
        assert!(out.contains("Goodbye!"));
    }

    #[test]
    fn test_end_of_input() {
        let mut store = demo_store();
        let (exit, _) = session(&mut store, "");
        assert_eq!(exit, Exit::EndOfInput);
    }

    #[test]
    fn test_invalid_choice_reprompts() {
        let mut store = demo_store();
        let (exit, out) = session(&mut store, "9\nabc\n4\n");

        assert_eq!(exit, Exit::Quit);
        assert_eq!(
            out.matches("Invalid choice. Please enter a number between 1 and 4.").count(),
            2
        );
    }

    #[test]
    fn test_list_and_total() {
        let mut store = demo_store();
        let (_, out) = session(&mut store, "1\n2\n4\n");

        assert!(out.contains("AVAILABLE PRODUCTS"));
        assert!(out.contains(
            "1. MacBook Air M2, Price: $1450.00, Quantity: 100, Promotion: Second Half price!"
        ));
        assert!(out.contains("4. Windows License, Price: $125.00, non-physical product - Not Stocked"));
        assert!(out.contains("5. Shipping, Price: $10.00, Quantity: 250, Max Purchase: 1"));
        assert!(out.contains("Total of 1100 items in store"));
    }

    #[test]
    fn test_order_with_promotions() {
        let mut store = demo_store();
        // 2 laptops (second half price) + 3 earbuds (third one free)
        let (_, out) = session(&mut store, "3\n1\n2\n2\n3\n\n4\n");

        assert!(out.contains("Added 2 x MacBook Air M2 to your order."));
        assert!(out.contains("Added 3 x Bose QuietComfort Earbuds to your order."));
        assert!(out.contains("ORDER SUMMARY"));
        assert!(out.contains("2 x MacBook Air M2 (Second Half price!): $2175.00"));
        assert!(out.contains("Order completed! Total price: $2675.00"));

        assert_eq!(quantity_of(&store, "MacBook Air M2"), 98);
        assert_eq!(quantity_of(&store, "Bose QuietComfort Earbuds"), 497);
    }

    #[test]
    fn test_quantity_reprompts_until_valid() {
        let mut store = demo_store();
        let (_, out) = session(&mut store, "3\n3\nten\n0\n-4\n251\n5\n0\n4\n");

        assert!(out.contains("Invalid input for quantity. Please enter a number."));
        assert!(out.contains("Quantity must be a positive number."));
        assert!(out.contains("Insufficient stock for Google Pixel 7: available 250, requested 251"));
        assert!(out.contains("Order completed! Total price: $2500.00"));
        assert_eq!(quantity_of(&store, "Google Pixel 7"), 245);
    }

    #[test]
    fn test_single_unit_product_only_once_per_order() {
        let mut store = demo_store();
        let (_, out) = session(&mut store, "3\n5\n2\n1\n5\n\n4\n");

        assert!(out.contains("Cannot purchase more than 1 of Shipping at a time (requested 2)"));
        assert!(out.contains("is limited to one per order and is already in your cart"));
        assert!(out.contains("Order completed! Total price: $10.00"));
        assert_eq!(quantity_of(&store, "Shipping"), 249);
    }

    #[test]
    fn test_invalid_product_numbers() {
        let mut store = demo_store();
        let (_, out) = session(&mut store, "3\n42\nxyz\n\n4\n");

        assert!(out.contains("Invalid product number. Please try again."));
        assert!(out.contains("Invalid input. Please enter a number for the product."));
        assert!(out.contains("Order cancelled or empty."));
        assert_eq!(store.total_quantity(), 1100);
    }

    #[test]
    fn test_non_stocked_quantity_prompt_has_no_availability() {
        let mut store = demo_store();
        let (_, out) = session(&mut store, "3\n4\n1000\n\n4\n");

        assert!(out.contains("Enter quantity for Windows License: "));
        // 1000 × $125 × 0.7
        assert!(out.contains("Order completed! Total price: $87500.00"));
    }

    #[test]
    fn test_unchargeable_quantity_reprompts_instead_of_crashing() {
        let mut store = demo_store();
        let (exit, out) = session(&mut store, "3\n4\n92233720368547758\n1\n\n4\n");

        assert_eq!(exit, Exit::Quit);
        assert!(out.contains("Price of 92233720368547758 x Windows License is too large to charge"));
        assert!(out.contains("Added 1 x Windows License to your order."));
        assert!(out.contains("Order completed! Total price: $87.50"));
    }

    #[test]
    fn test_sold_out_products_leave_the_listing() {
        let mut store = demo_store();
        let (_, out) = session(&mut store, "3\n3\n250\n\n1\n4\n");

        let listing = out.rsplit("AVAILABLE PRODUCTS").next().unwrap();
        assert!(!listing.contains("Google Pixel 7"));
        assert!(listing.contains("4. Shipping"));
    }

    #[test]
    fn test_order_failure_is_reported_and_session_continues() {
        let mut store = demo_store();
        // Two lines of 200 phones each pass the per-line check; the
        // second fails at settlement after the first is charged.
        let (exit, out) = session(&mut store, "3\n3\n200\n3\n200\n\n4\n");

        assert_eq!(exit, Exit::Quit);
        assert!(out.contains("Error during order processing: Insufficient stock for Google Pixel 7"));
        assert_eq!(quantity_of(&store, "Google Pixel 7"), 50);
    }

    #[test]
    fn test_end_of_input_mid_order_settles_nothing() {
        let mut store = demo_store();
        let (exit, _) = session(&mut store, "3\n1\n2\n");

        assert_eq!(exit, Exit::EndOfInput);
        assert_eq!(store.total_quantity(), 1100);
    }
}
