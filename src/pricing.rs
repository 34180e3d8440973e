//! Order pricing and admission policy.
//!
//! Orders placed by waiters are house orders: they are never billed through
//! this flow. Every other caller places a customer order at the total they
//! submitted. The submitted total is not recomputed from the item prices.

use crate::models::{OrderType, Role};

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Pricing {
    pub order_type: OrderType,
    pub total: f64,
}

pub fn classify(role: &Role, submitted_total: f64) -> Pricing {
    match role {
        Role::Waiter => Pricing {
            order_type: OrderType::Waiter,
            total: 0.0,
        },
        _ => Pricing {
            order_type: OrderType::Customer,
            total: submitted_total,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOTALS: [f64; 5] = [0.0, 0.01, 10.0, 42.5, 99999.99];

    #[test]
    fn test_waiter_orders_are_free() {
        for total in TOTALS {
            assert_eq!(
                classify(&Role::Waiter, total),
                Pricing {
                    order_type: OrderType::Waiter,
                    total: 0.0
                }
            );
        }
        assert_eq!(classify(&Role::from("garcom"), 42.5).total, 0.0);
    }

    #[test]
    fn test_other_roles_pay_submitted_total() {
        let roles = [
            Role::Admin,
            Role::Customer,
            Role::Other("kitchen".to_owned()),
            Role::Other("".to_owned()),
        ];

        for role in roles.iter() {
            for total in TOTALS {
                assert_eq!(
                    classify(role, total),
                    Pricing {
                        order_type: OrderType::Customer,
                        total
                    }
                );
            }
        }
    }
}
