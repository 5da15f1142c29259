//! End-to-end booking flows over an in-memory store and a text surface.
//!
//! Menu used throughout:
//!
//! - Burger: $9.99
//! - Fries: $2.50
//!
//! Adding a burger twice and fries once books 3 items for $22.48
//! (2 × 9.99 + 2.50).

use std::cell::RefCell;

use rust_decimal::Decimal;
use testresult::TestResult;

use booking::prelude::*;

#[derive(Debug, Default)]
struct RecordingNotifier {
    messages: RefCell<Vec<String>>,
}

impl Notifier for &RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

fn page<'a>(
    storage: &'a MemoryStorage,
    notifier: &'a RecordingNotifier,
) -> Result<BookingPage<&'a MemoryStorage, TextSurface<Vec<u8>>, &'a RecordingNotifier>, ConfigError>
{
    BookingPage::new(
        &BookingConfig::default(),
        storage,
        TextSurface::new(Vec::new()),
        notifier,
    )
}

fn add(name: &str, price: &str) -> Action {
    Action::Add {
        name: name.to_string(),
        price: price.to_string(),
    }
}

#[test]
fn burger_and_fries_scenario() -> TestResult {
    let storage = MemoryStorage::new();
    let notifier = RecordingNotifier::default();
    let mut page = page(&storage, &notifier)?;

    page.dispatch(add("Burger", "9.99"))?;
    page.dispatch(add("Burger", "9.99"))?;
    page.dispatch(add("Fries", "2.50"))?;

    assert_eq!(
        page.cart().items()?,
        vec![
            LineItem {
                name: "Burger".to_string(),
                price: Decimal::new(999, 2),
                quantity: 2,
            },
            LineItem {
                name: "Fries".to_string(),
                price: Decimal::new(250, 2),
                quantity: 1,
            },
        ]
    );

    let Some(Rendering::Listing { summary, .. }) = page.render()? else {
        return Err("expected a listing".into());
    };

    assert_eq!(summary.total_items, 3);
    assert_eq!(summary.total_price, "22.48");
    assert_eq!(notifier.messages.borrow().len(), 3);

    Ok(())
}

#[test]
fn repeated_adds_accumulate_into_one_line() -> TestResult {
    for count in 1..=12_u32 {
        let storage = MemoryStorage::new();
        let cart = Cart::new(BookingStore::new(&storage));

        cart.add_item("Burger", "9.99")?;
        for _ in 1..count {
            cart.add_item("Burger", "11.49")?;
        }

        let items = cart.items()?;

        assert_eq!(items.len(), 1, "one line after {count} adds");
        assert_eq!(items.first().map(|item| item.quantity), Some(count));
        assert_eq!(
            items.first().map(|item| item.price),
            Some(Decimal::new(999, 2)),
            "first price wins after {count} adds"
        );
    }

    Ok(())
}

#[test]
fn removing_an_absent_item_leaves_the_store_unchanged() -> TestResult {
    let storage = MemoryStorage::new();
    let cart = Cart::new(BookingStore::new(&storage));

    cart.add_item("Burger", "9.99")?;
    let before = storage.get_item(DEFAULT_STORAGE_KEY)?;

    cart.remove_item("Salad")?;
    cart.remove_item("Salad")?;

    assert_eq!(storage.get_item(DEFAULT_STORAGE_KEY)?, before);

    Ok(())
}

#[test]
fn stored_quantity_is_never_below_one() -> TestResult {
    let storage = MemoryStorage::new();
    let cart = Cart::new(BookingStore::new(&storage));

    cart.add_item("Burger", "9.99")?;

    for requested in [-10_i64, -1, 0, 1, 2, 40] {
        cart.update_quantity("Burger", requested)?;

        let stored = cart.items()?.first().map(|item| i64::from(item.quantity));

        assert_eq!(stored, Some(requested.max(1)), "requested {requested}");
    }

    Ok(())
}

#[test]
fn render_twice_without_changes_is_identical() -> TestResult {
    let storage = MemoryStorage::new();
    let store = BookingStore::new(&storage);
    let renderer = Renderer::new(rusty_money::iso::USD, "No items in your booking.");

    store.save(&[LineItem::new("Fries", Decimal::new(250, 2))])?;

    let mut surface = TextSurface::new(Vec::new());
    let first = renderer.render(&store, &mut surface)?;
    let first_output = surface.into_inner();

    let mut surface = TextSurface::new(Vec::new());
    let second = renderer.render(&store, &mut surface)?;

    assert_eq!(first, second);
    assert_eq!(first_output, surface.into_inner());

    Ok(())
}

#[test]
fn totals_for_mixed_quantities() -> TestResult {
    let storage = MemoryStorage::new();
    let store = BookingStore::new(&storage);
    let renderer = Renderer::new(rusty_money::iso::USD, "No items in your booking.");

    store.save(&[
        LineItem {
            name: "Steak".to_string(),
            price: Decimal::new(500, 2),
            quantity: 2,
        },
        LineItem::new("Salad", Decimal::new(350, 2)),
    ])?;

    let rendering = renderer.project(&store.load()?)?;

    assert!(matches!(
        rendering,
        Rendering::Listing { summary, .. }
            if summary.total_items == 3 && summary.total_price == "13.50"
    ));

    Ok(())
}

#[test]
fn submit_clears_and_shows_empty_state() -> TestResult {
    let storage = MemoryStorage::new();
    let notifier = RecordingNotifier::default();
    let mut page = page(&storage, &notifier)?;

    page.dispatch(add("Burger", "9.99"))?;
    page.dispatch(Action::Submit)?;

    assert!(page.cart().items()?.is_empty());
    assert_eq!(
        page.render()?,
        Some(Rendering::Empty {
            message: "No items in your booking.".to_string(),
        })
    );
    assert_eq!(
        notifier.messages.borrow().last().map(String::as_str),
        Some("Thank you for your booking! Your order has been submitted.")
    );

    Ok(())
}

#[test]
fn stale_row_handlers_act_by_name_after_removal() -> TestResult {
    let storage = MemoryStorage::new();
    let notifier = RecordingNotifier::default();
    let mut page = page(&storage, &notifier)?;

    page.dispatch(add("Burger", "9.99"))?;
    page.dispatch(add("Fries", "2.50"))?;

    let Some(Rendering::Listing { rows, .. }) = page.render()? else {
        return Err("expected a listing".into());
    };

    let fries = rows
        .iter()
        .find(|row| row.name == "Fries")
        .ok_or("expected a fries row")?;

    page.dispatch(Action::Remove {
        name: "Burger".to_string(),
    })?;

    let update = fries
        .on_quantity
        .action_for("4")
        .ok_or("expected a valid quantity")?;
    page.dispatch(update)?;

    let items = page.cart().items()?;

    assert_eq!(items.len(), 1);
    assert_eq!(
        items.first().map(|item| (item.name.as_str(), item.quantity)),
        Some(("Fries", 4))
    );

    Ok(())
}

#[test]
fn rejected_quantity_input_leaves_store_unchanged() -> TestResult {
    let storage = MemoryStorage::new();
    let notifier = RecordingNotifier::default();
    let mut page = page(&storage, &notifier)?;

    page.dispatch(add("Burger", "9.99"))?;
    let before = storage.get_item(DEFAULT_STORAGE_KEY)?;

    let Some(Rendering::Listing { rows, .. }) = page.render()? else {
        return Err("expected a listing".into());
    };
    let burger = rows.first().ok_or("expected a row")?;

    assert_eq!(burger.on_quantity.action_for("zero"), None);
    assert_eq!(burger.on_quantity.previous(), 1);
    assert_eq!(storage.get_item(DEFAULT_STORAGE_KEY)?, before);

    Ok(())
}

#[test]
fn corrupt_storage_fails_operations() -> TestResult {
    let storage = MemoryStorage::new();
    storage.set_item(DEFAULT_STORAGE_KEY, "not json")?;

    let cart = Cart::new(BookingStore::new(&storage));

    assert!(matches!(
        cart.add_item("Burger", "9.99"),
        Err(CartError::Store(StoreError::Corrupt(_)))
    ));
    assert_eq!(
        storage.get_item(DEFAULT_STORAGE_KEY)?.as_deref(),
        Some("not json")
    );

    Ok(())
}

#[test]
fn file_storage_persists_across_carts() -> TestResult {
    let dir = tempfile::tempdir()?;

    Cart::new(BookingStore::new(FileStorage::new(dir.path()))).add_item("Burger", "9.99")?;

    let reopened = Cart::new(BookingStore::new(FileStorage::new(dir.path())));
    reopened.add_item("Burger", "9.99")?;

    assert_eq!(
        reopened.items()?.first().map(|item| item.quantity),
        Some(2)
    );

    Ok(())
}
