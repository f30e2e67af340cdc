use anyhow::bail;
use cementlife_core::{
    AppConfig, BankTransferDetails, Catalog, Category, OrderStore, RegionId, RegionLookup,
};
use cementlife_db::PgOrderStore;
use cementlife_regions::RegionClient;
use cementlife_storefront::{MemoryOrderStore, Storefront, SubmitOutcome};

use super::PlaceArgs;

/// Run one storefront session from the command line arguments.
///
/// # Errors
///
/// Returns an error if a pick is not in the catalog, the checkout form does
/// not validate, or the store rejects the order.
pub(crate) async fn run_order_place(
    config: &AppConfig,
    catalog: Catalog,
    args: PlaceArgs,
) -> anyhow::Result<()> {
    let lookup = RegionClient::from_config(&config.regions, &config.user_agent)?;
    let bank = config.bank_transfer.clone();

    if args.dry_run {
        let storefront = Storefront::new(catalog, lookup, MemoryOrderStore::default(), bank);
        place(&storefront, &args).await?;
        if let Some(stored) = storefront.store().orders().await.last() {
            println!("dry run: order not written to the database");
            println!("{}", serde_json::to_string_pretty(&stored.order)?);
        }
        return Ok(());
    }

    let pool = cementlife_db::connect_pool_from_config(config).await?;
    let storefront = Storefront::new(catalog, lookup, PgOrderStore::new(pool), bank);
    place(&storefront, &args).await
}

async fn place<L, S>(storefront: &Storefront<L, S>, args: &PlaceArgs) -> anyhow::Result<()>
where
    L: RegionLookup + Sync,
    S: OrderStore + Sync,
{
    storefront.start().await;
    let picks = [
        (Category::Container, args.container.as_deref()),
        (Category::Plant, args.plant.as_deref()),
        (Category::Topping, args.topping.as_deref()),
    ];
    for (category, pick) in picks {
        if let Some(id) = pick {
            storefront.select_option(category, id).await?;
        }
        storefront.next_step().await;
    }
    if let Some(name) = &args.creation_name {
        storefront.set_creation_name(name.clone()).await;
    }

    if !storefront.open_checkout().await {
        bail!("checkout could not be opened");
    }
    storefront
        .select_province(Some(RegionId::parse(&args.province)))
        .await;
    storefront
        .select_district(Some(RegionId::parse(&args.district)))
        .await;
    storefront
        .select_ward(Some(RegionId::parse(&args.ward)))
        .await;
    storefront
        .update_form(|form| {
            form.customer_name.clone_from(&args.name);
            form.phone.clone_from(&args.phone);
            form.email.clone_from(&args.email);
            form.address_line.clone_from(&args.address);
            form.payment_method = args.payment;
        })
        .await;

    let bank = storefront
        .view()
        .checkout
        .and_then(|checkout| checkout.bank_transfer);

    match storefront.submit().await {
        SubmitOutcome::Placed { order_id } => {
            if let Some(notice) = storefront.view().notice {
                println!("{}", notice.message);
            }
            tracing::debug!(?order_id, "checkout finished");
            if let Some(bank) = bank {
                print_bank_details(&bank);
            }
            Ok(())
        }
        SubmitOutcome::Rejected(rejection) => bail!("order not submitted: {rejection}"),
        SubmitOutcome::Failed(message) => bail!("order failed: {message}"),
    }
}

fn print_bank_details(bank: &BankTransferDetails) {
    println!("Chuyển khoản tới:");
    println!("  Ngân hàng:     {}", bank.bank_name);
    println!("  Số tài khoản:  {}", bank.account_number);
    println!("  Chủ tài khoản: {}", bank.account_holder);
}
