//! Create Order Use Case

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::transaction::abort;
use crate::domain::dish::DishRepository;
use crate::domain::order::CreateOrderCommand;
use crate::domain::restaurant::RestaurantRepository;
use crate::domain::shared::{OrderId, StoreError};
use crate::error::ServiceError;
use crate::infrastructure::persistence::{Database, UnitOfWork};

/// Use case for placing an order.
///
/// Referential checks run first, outside any transaction. The header and
/// every line are then written in one transaction: either all rows become
/// visible or none do.
pub struct CreateOrderUseCase<R, D>
where
    R: RestaurantRepository,
    D: DishRepository,
{
    restaurant_repo: Arc<R>,
    dish_repo: Arc<D>,
    db: Arc<Database>,
}

impl<R, D> CreateOrderUseCase<R, D>
where
    R: RestaurantRepository,
    D: DishRepository,
{
    /// Create a new `CreateOrderUseCase`.
    pub const fn new(restaurant_repo: Arc<R>, dish_repo: Arc<D>, db: Arc<Database>) -> Self {
        Self {
            restaurant_repo,
            dish_repo,
            db,
        }
    }

    /// Place an order and return its id.
    ///
    /// Fails with `RESTAURANT_NOT_FOUND` when the restaurant is absent and
    /// with `DISH_NOT_FOUND` naming the first line whose dish is absent or
    /// belongs to another restaurant.
    pub async fn execute(&self, command: &CreateOrderCommand) -> Result<OrderId, ServiceError> {
        let restaurant_id = command.restaurant_id();

        // 1. Restaurant must exist
        if !self.restaurant_repo.exists(restaurant_id).await? {
            return Err(ServiceError::restaurant_not_found(restaurant_id));
        }

        // 2. Every dish must belong to it, checked in request order
        for line in command.lines() {
            if !self
                .dish_repo
                .exists_in_restaurant(line.dish_id(), restaurant_id)
                .await?
            {
                return Err(ServiceError::dish_not_found(line.dish_id())
                    .with_context("restaurant_id", restaurant_id.to_string()));
            }
        }

        // 3. Write header and lines atomically
        let order_id = OrderId::generate();
        let mut uow = self.db.begin().await?;
        let written = Self::write_order(&mut uow, order_id, command).await;
        if let Err(e) = written {
            abort(uow, "create_order", &e).await;
            return Err(e.into());
        }
        uow.commit().await?;

        info!(
            order_id = %order_id,
            restaurant_id = %restaurant_id,
            items = command.lines().len(),
            "Order created"
        );
        Ok(order_id)
    }

    async fn write_order(
        uow: &mut UnitOfWork,
        order_id: OrderId,
        command: &CreateOrderCommand,
    ) -> Result<(), StoreError> {
        uow.execute(
            "INSERT INTO orders (id, restaurant_id, created_at) VALUES (?, ?, ?)",
            &[
                order_id.into(),
                command.restaurant_id().into(),
                Utc::now().into(),
            ],
        )
        .await?;

        for line in command.lines() {
            uow.execute(
                "INSERT INTO order_items (order_id, dish_id, amount) VALUES (?, ?, ?)",
                &[
                    order_id.into(),
                    line.dish_id().into(),
                    line.amount().into(),
                ],
            )
            .await?;
            debug!(order_id = %order_id, dish_id = %line.dish_id(), amount = line.amount(), "Order item written");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::use_cases::fixtures::Fixture;
    use crate::domain::order::{OrderLine, OrderRepository};
    use crate::domain::shared::{DishId, RestaurantId};
    use crate::error::ErrorCode;
    use crate::infrastructure::persistence::{
        SqliteDishRepository, SqliteOrderRepository, SqliteRestaurantRepository,
    };
    use rust_decimal_macros::dec;

    type UseCase = CreateOrderUseCase<SqliteRestaurantRepository, SqliteDishRepository>;

    fn use_case(fx: &Fixture) -> UseCase {
        CreateOrderUseCase::new(
            Arc::clone(&fx.restaurants),
            Arc::clone(&fx.dishes),
            Arc::clone(&fx.db),
        )
    }

    fn command(restaurant: RestaurantId, lines: &[(DishId, i64)]) -> CreateOrderCommand {
        let lines = lines
            .iter()
            .map(|(dish, amount)| OrderLine::new(Some(*dish), Some(*amount)).unwrap())
            .collect();
        CreateOrderCommand::new(Some(restaurant), Some(lines)).unwrap()
    }

    async fn order_rows(fx: &Fixture) -> (i64, i64) {
        (
            fx.count("orders", None).await,
            fx.count("order_items", None).await,
        )
    }

    #[tokio::test]
    async fn order_is_created_with_all_items() {
        let fx = Fixture::new().await;
        let r1 = fx.restaurant("r1").await;
        let d1 = fx.dish(r1.id, "d1", dec!(10)).await;
        let d2 = fx.dish(r1.id, "d2", dec!(8)).await;

        let order_id = use_case(&fx)
            .execute(&command(r1.id, &[(d1.id, 2), (d2.id, 1)]))
            .await
            .unwrap();

        let order = SqliteOrderRepository::new(Arc::clone(&fx.db))
            .find_by_id(order_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.restaurant_id, r1.id);
        let lines: Vec<_> = order.items.iter().map(|i| (i.dish_id, i.amount)).collect();
        assert_eq!(lines, vec![(d1.id, 2), (d2.id, 1)]);
    }

    #[tokio::test]
    async fn unknown_dish_is_named_and_nothing_is_written() {
        let fx = Fixture::new().await;
        let r1 = fx.restaurant("r1").await;
        let d1 = fx.dish(r1.id, "d1", dec!(10)).await;

        let err = use_case(&fx)
            .execute(&command(r1.id, &[(d1.id, 2), (DishId::new(99), 1)]))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::DishNotFound);
        assert_eq!(err.context_value("dish_id"), Some("99"));
        assert_eq!(order_rows(&fx).await, (0, 0));
    }

    #[tokio::test]
    async fn dish_of_another_restaurant_is_rejected() {
        let fx = Fixture::new().await;
        let r1 = fx.restaurant("r1").await;
        let r2 = fx.restaurant("r2").await;
        let d1 = fx.dish(r1.id, "d1", dec!(10)).await;
        let foreign = fx.dish(r2.id, "foreign", dec!(5)).await;

        let err = use_case(&fx)
            .execute(&command(r1.id, &[(d1.id, 1), (foreign.id, 1)]))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::DishNotFound);
        assert_eq!(err.context_value("dish_id"), Some(foreign.id.to_string().as_str()));
        assert_eq!(order_rows(&fx).await, (0, 0));
    }

    #[tokio::test]
    async fn first_offending_dish_is_reported() {
        let fx = Fixture::new().await;
        let r1 = fx.restaurant("r1").await;

        let err = use_case(&fx)
            .execute(&command(r1.id, &[(DishId::new(7), 1), (DishId::new(8), 1)]))
            .await
            .unwrap_err();

        assert_eq!(err.context_value("dish_id"), Some("7"));
    }

    #[tokio::test]
    async fn missing_restaurant_is_rejected() {
        let fx = Fixture::new().await;

        let err = use_case(&fx)
            .execute(&command(RestaurantId::new(5), &[(DishId::new(1), 1)]))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::RestaurantNotFound);
        assert_eq!(order_rows(&fx).await, (0, 0));
    }

    #[tokio::test]
    async fn failed_item_insert_rolls_back_header_and_earlier_items() {
        let fx = Fixture::new().await;
        let r1 = fx.restaurant("r1").await;
        let d1 = fx.dish(r1.id, "d1", dec!(10)).await;
        let d2 = fx.dish(r1.id, "d2", dec!(8)).await;
        fx.fail_order_items_with_amount(13).await;

        let err = use_case(&fx)
            .execute(&command(r1.id, &[(d1.id, 2), (d2.id, 13)]))
            .await
            .unwrap_err();

        assert!(!err.code().is_client_error(), "got {err}");
        assert_eq!(order_rows(&fx).await, (0, 0));

        // The connection is usable again after the rollback.
        use_case(&fx)
            .execute(&command(r1.id, &[(d1.id, 2)]))
            .await
            .unwrap();
        assert_eq!(order_rows(&fx).await, (1, 1));
    }

    #[tokio::test]
    async fn rejected_commit_leaves_no_order_rows() {
        let fx = Fixture::new().await;
        let r1 = fx.restaurant("r1").await;
        let d1 = fx.dish(r1.id, "d1", dec!(10)).await;
        let d2 = fx.dish(r1.id, "d2", dec!(8)).await;
        fx.fail_commit_after_order_insert().await;

        let err = use_case(&fx)
            .execute(&command(r1.id, &[(d1.id, 2), (d2.id, 1)]))
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::StoreError, "got {err}");
        assert!(err.code().http_status().is_server_error());
        assert_eq!(order_rows(&fx).await, (0, 0));
        assert_eq!(fx.count("audit", None).await, 0);
    }
}
