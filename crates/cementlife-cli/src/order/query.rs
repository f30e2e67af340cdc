use cementlife_core::{format_vnd, OrderStatus, OrderStore};
use cementlife_db::{OrderRow, PgOrderStore};

/// Set an order's status.
///
/// # Errors
///
/// Returns an error if the order does not exist or the update fails.
pub(crate) async fn run_order_status(
    store: &PgOrderStore,
    id: i64,
    status: OrderStatus,
) -> anyhow::Result<()> {
    store.update_order_status(id, status).await?;
    println!("order #{id} is now {status}");
    Ok(())
}

/// Print one order with its line items.
///
/// # Errors
///
/// Returns an error if the order does not exist, the query fails, or the
/// stored detail cannot be decoded.
pub(crate) async fn run_order_show(pool: &sqlx::PgPool, id: i64) -> anyhow::Result<()> {
    let row = cementlife_db::get_order(pool, id).await?;
    let detail = row.detail()?;

    println!("Order #{} ({})", row.id, row.public_id);
    println!("Status:   {}", row.status);
    println!("Placed:   {}", row.created_at.format("%Y-%m-%d %H:%M"));
    println!("Customer: {} <{}> {}", row.customer_name, row.email, row.phone);
    println!("Address:  {}", row.address);
    println!("Payment:  {}", detail.payment_method.label());
    println!();
    for line in &detail.lines {
        let title = line.creation_name.as_deref().unwrap_or("\u{2014}");
        println!(
            "  {:<20}{} / {} / {}  {:>10}",
            title,
            line.container.name,
            line.plant.name,
            line.topping.name,
            format_vnd(line.total)
        );
    }
    println!("Total:    {}", format_vnd(row.total_amount));
    Ok(())
}

/// Print the most recent orders.
///
/// # Errors
///
/// Returns an error if the query fails.
pub(crate) async fn run_order_list(
    pool: &sqlx::PgPool,
    status: Option<OrderStatus>,
    limit: i64,
) -> anyhow::Result<()> {
    let rows = cementlife_db::list_orders(pool, status, limit).await?;

    if rows.is_empty() {
        println!(
            "no orders found{}",
            status.map(|s| format!(" with status {s}")).unwrap_or_default()
        );
        return Ok(());
    }

    println!(
        "{:<8}{:<11}{:<18}{:>12}  CUSTOMER",
        "ID", "STATUS", "PLACED", "TOTAL"
    );
    for row in &rows {
        println!("{}", format_row(row));
    }
    Ok(())
}

fn format_row(row: &OrderRow) -> String {
    format!(
        "{:<8}{:<11}{:<18}{:>12}  {}",
        row.id,
        row.status,
        row.created_at.format("%Y-%m-%d %H:%M"),
        format_vnd(row.total_amount),
        row.customer_name
    )
}
