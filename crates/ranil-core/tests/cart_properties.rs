use proptest::prelude::*;
use proptest::test_runner::Config;
use ranil_core::{Cart, Money, Product, Quantity};
use rust_decimal::Decimal;

fn catalog(stocks: &[i64]) -> Vec<Product> {
    stocks
        .iter()
        .enumerate()
        .map(|(i, stock)| Product {
            id: format!("{}", i + 1),
            name: format!("Product {}", i + 1),
            category: "Poultry Feed".to_string(),
            price: Money::from_cents(3500 + 25 * i as i64),
            stock: Quantity::from_units(*stock),
            unit: "kg".to_string(),
            low_stock_threshold: Quantity::from_units(5),
            supplier_id: "1".to_string(),
        })
        .collect()
}

/// Quantities in quarter units, as sold by weight.
fn quarters() -> impl Strategy<Value = Quantity> {
    (-4_i64..80).prop_map(|q| Quantity::new(Decimal::new(q * 25, 2)))
}

#[derive(Debug, Clone)]
enum Op {
    Add(usize, Quantity),
    Set(usize, Quantity),
    Remove(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0_usize..4, quarters()).prop_map(|(p, q)| Op::Add(p, q)),
        (0_usize..4, quarters()).prop_map(|(p, q)| Op::Set(p, q)),
        (0_usize..4).prop_map(Op::Remove),
    ]
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn reservations_never_exceed_stock(
        stocks in proptest::collection::vec(0_i64..20, 3),
        ops in proptest::collection::vec(op(), 1..40)
    ) {
        let products = catalog(&stocks);
        let mut cart = Cart::new("1");

        for op in ops {
            // index 3 is never in the catalog
            let id = |i: usize| format!("{}", i + 1);
            let before = cart.clone();
            let result = match op {
                Op::Add(p, q) => cart.add_quantity(&products, &id(p), q).map(|_| ()),
                Op::Set(p, q) => cart.set_quantity(&products, &id(p), q),
                Op::Remove(p) => {
                    cart.remove_line(&id(p));
                    Ok(())
                }
            };
            if result.is_err() {
                prop_assert_eq!(cart.lines(), before.lines());
            }

            for product in &products {
                prop_assert!(cart.reserved(&product.id) <= product.stock);
            }
            for line in cart.lines() {
                prop_assert!(line.quantity.is_positive());
            }
        }
    }

    #[test]
    fn set_zero_matches_remove(
        stock in 1_i64..50,
        qty in 1_i64..50
    ) {
        let products = catalog(&[stock]);
        let mut a = Cart::new("1");
        let mut b = Cart::new("1");
        let qty = Quantity::from_units(qty.min(stock));

        a.add_quantity(&products, "1", qty).unwrap();
        b.add_quantity(&products, "1", qty).unwrap();

        a.set_quantity(&products, "1", Quantity::zero()).unwrap();
        b.remove_line("1");

        prop_assert_eq!(a.lines(), b.lines());
        prop_assert!(a.is_empty());
    }

    #[test]
    fn checkout_total_equals_cart_total(
        stocks in proptest::collection::vec(1_i64..20, 3),
        picks in proptest::collection::vec((0_usize..3, 1_i64..8), 1..10)
    ) {
        let products = catalog(&stocks);
        let mut cart = Cart::new("1");
        for (p, quarter_count) in picks {
            let qty = Quantity::new(Decimal::new(quarter_count * 25, 2));
            let _ = cart.add_quantity(&products, &products[p].id, qty);
        }
        prop_assume!(!cart.is_empty());

        let expected = cart.total();
        let lines = cart.lines().to_vec();
        let sale = cart.checkout().unwrap();

        prop_assert_eq!(sale.total(), expected);
        prop_assert_eq!(sale.lines(), lines.as_slice());
        prop_assert!(cart.is_empty());
    }
}
