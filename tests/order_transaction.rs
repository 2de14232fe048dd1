mod common;

use coffee_shop_api::{
    dto::{
        coffees::UpdateCoffeeRequest,
        orders::{CreateOrderRequest, OrderItemRequest},
    },
    entity::{
        order_items::{Column as OrderItemCol, Entity as OrderItems},
        orders::{Column as OrderCol, Entity as Orders},
    },
    error::AppError,
    models::Role,
    services::{coffee_service, order_service},
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use uuid::Uuid;

fn order_for(items: Vec<OrderItemRequest>) -> CreateOrderRequest {
    CreateOrderRequest {
        items,
        shipping_address: "1 Roast Lane".into(),
        billing_address: "1 Roast Lane".into(),
        payment_method: "card".into(),
        total_amount: None,
    }
}

#[tokio::test]
async fn order_with_items_is_stored_with_price_snapshots() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let customer = common::create_user(&state, Role::Customer).await?;
    let espresso = common::create_coffee(&state, 300).await?;
    let latte = common::create_coffee(&state, 450).await?;

    let created = order_service::create_order(
        &state,
        customer.user_id,
        order_for(vec![
            OrderItemRequest {
                coffee_id: espresso,
                quantity: 2,
            },
            OrderItemRequest {
                coffee_id: latte,
                quantity: 1,
            },
        ]),
    )
    .await?
    .data
    .expect("order data");

    assert_eq!(created.order.user_id, customer.user_id);
    assert_eq!(created.order.status, "pending");
    assert_eq!(created.order.payment_status, "unpaid");
    assert_eq!(created.order.total_amount, 2 * 300 + 450);
    assert_eq!(created.items.len(), 2);

    let stored = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(created.order.id))
        .all(&state.orm)
        .await?;
    assert_eq!(stored.len(), 2);
    let espresso_line = stored
        .iter()
        .find(|item| item.coffee_id == espresso)
        .expect("espresso line");
    assert_eq!(espresso_line.price_at_order, 300);
    assert_eq!(espresso_line.quantity, 2);
    Ok(())
}

#[tokio::test]
async fn client_total_is_kept_when_supplied() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let customer = common::create_user(&state, Role::Customer).await?;
    let coffee = common::create_coffee(&state, 500).await?;

    let mut request = order_for(vec![OrderItemRequest {
        coffee_id: coffee,
        quantity: 1,
    }]);
    request.total_amount = Some(450);

    let created = order_service::create_order(&state, customer.user_id, request)
        .await?
        .data
        .expect("order data");
    assert_eq!(created.order.total_amount, 450);
    assert_eq!(created.items[0].price_at_order, 500);
    Ok(())
}

#[tokio::test]
async fn unknown_coffee_rolls_back_the_whole_order() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let customer = common::create_user(&state, Role::Customer).await?;
    let real = common::create_coffee(&state, 300).await?;
    let missing = Uuid::new_v4();

    let err = order_service::create_order(
        &state,
        customer.user_id,
        order_for(vec![
            OrderItemRequest {
                coffee_id: real,
                quantity: 1,
            },
            OrderItemRequest {
                coffee_id: missing,
                quantity: 1,
            },
        ]),
    )
    .await
    .unwrap_err();

    match err {
        AppError::OrderCreation(message) => {
            assert!(message.contains("item 1"), "{message}");
            assert!(message.contains(&missing.to_string()), "{message}");
        }
        other => panic!("expected OrderCreation, got {other:?}"),
    }

    let orders = Orders::find()
        .filter(OrderCol::UserId.eq(customer.user_id))
        .count(&state.orm)
        .await?;
    assert_eq!(orders, 0);
    Ok(())
}

#[tokio::test]
async fn later_price_change_does_not_touch_placed_orders() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let admin = common::create_admin(&state).await?;
    let customer = common::create_user(&state, Role::Customer).await?;
    let coffee = common::create_coffee(&state, 500).await?;

    let created = order_service::create_order(
        &state,
        customer.user_id,
        order_for(vec![OrderItemRequest {
            coffee_id: coffee,
            quantity: 3,
        }]),
    )
    .await?
    .data
    .expect("order data");

    coffee_service::update_coffee(
        &state,
        &admin,
        coffee,
        UpdateCoffeeRequest {
            price: Some(700),
            ..Default::default()
        },
    )
    .await?;

    let fetched = order_service::get_order(&state, &customer, created.order.id)
        .await?
        .data
        .expect("order data");
    assert_eq!(fetched.items[0].price_at_order, 500);
    assert_eq!(fetched.order.total_amount, 1500);

    let current = coffee_service::get_coffee(&state, coffee)
        .await?
        .data
        .expect("coffee data");
    assert_eq!(current.price, 700);
    Ok(())
}

#[tokio::test]
async fn deleting_an_order_removes_its_items() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let admin = common::create_admin(&state).await?;
    let customer = common::create_user(&state, Role::Customer).await?;
    let coffee = common::create_coffee(&state, 250).await?;

    let created = order_service::create_order(
        &state,
        customer.user_id,
        order_for(vec![OrderItemRequest {
            coffee_id: coffee,
            quantity: 2,
        }]),
    )
    .await?
    .data
    .expect("order data");
    let order_id = created.order.id;

    order_service::delete_order(&state, &admin, order_id).await?;

    let items = OrderItems::find()
        .filter(OrderItemCol::OrderId.eq(order_id))
        .count(&state.orm)
        .await?;
    assert_eq!(items, 0);

    let err = order_service::get_order(&state, &admin.0, order_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = order_service::delete_order(&state, &admin, order_id)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
    Ok(())
}

#[tokio::test]
async fn line_total_overflow_is_rejected() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let customer = common::create_user(&state, Role::Customer).await?;
    let coffee = common::create_coffee(&state, i64::MAX / 2 + 1).await?;

    let err = order_service::create_order(
        &state,
        customer.user_id,
        order_for(vec![OrderItemRequest {
            coffee_id: coffee,
            quantity: 2,
        }]),
    )
    .await
    .unwrap_err();

    match err {
        AppError::OrderCreation(message) => assert!(message.contains("overflows"), "{message}"),
        other => panic!("expected OrderCreation, got {other:?}"),
    }

    let orders = Orders::find()
        .filter(OrderCol::UserId.eq(customer.user_id))
        .count(&state.orm)
        .await?;
    assert_eq!(orders, 0);
    Ok(())
}

#[tokio::test]
async fn failed_item_insert_rolls_back_header_and_earlier_items() -> anyhow::Result<()> {
    let Some(state) = common::setup_state().await? else {
        return Ok(());
    };
    let customer = common::create_user(&state, Role::Customer).await?;
    let first = common::create_coffee(&state, 300).await?;
    let second = common::create_coffee(&state, 400).await?;

    // the header and the first line are written before the second line
    // trips the quantity CHECK constraint
    let err = order_service::create_order(
        &state,
        customer.user_id,
        order_for(vec![
            OrderItemRequest {
                coffee_id: first,
                quantity: 1,
            },
            OrderItemRequest {
                coffee_id: second,
                quantity: 0,
            },
        ]),
    )
    .await
    .unwrap_err();

    match err {
        AppError::OrderCreation(message) => assert!(message.contains("item 1"), "{message}"),
        other => panic!("expected OrderCreation, got {other:?}"),
    }

    let orders = Orders::find()
        .filter(OrderCol::UserId.eq(customer.user_id))
        .count(&state.orm)
        .await?;
    assert_eq!(orders, 0);

    let items = OrderItems::find()
        .filter(OrderItemCol::CoffeeId.is_in([first, second]))
        .count(&state.orm)
        .await?;
    assert_eq!(items, 0);
    Ok(())
}
