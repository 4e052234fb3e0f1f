//! # Admin Commands
//!
//! Product management and the user list. The dispatcher refuses these for a
//! signed-in user that is not an administrator.

use storefront_client::Dispatcher;
use storefront_core::{Money, ProductDraft, ProductPatch};

use super::{render, Rendered};
use crate::cli::{AdminCommand, ProductArgs, ProductChanges};
use crate::error::CliResult;

pub async fn execute(dispatcher: &Dispatcher, action: AdminCommand) -> CliResult<Rendered> {
    match action {
        AdminCommand::Users => render(dispatcher.get_all_users().await),
        AdminCommand::CreateProduct(args) => {
            render(dispatcher.create_product(&ProductDraft::from(args)).await)
        }
        AdminCommand::UpdateProduct { id, changes } => {
            render(dispatcher.update_product(id, &ProductPatch::from(changes)).await)
        }
        AdminCommand::DeleteProduct { id } => render(dispatcher.delete_product(id).await),
    }
}

impl From<ProductArgs> for ProductDraft {
    fn from(args: ProductArgs) -> Self {
        ProductDraft {
            name: args.name,
            description: args.description,
            price: Money::from_decimal(args.price),
            stock: args.stock,
            category_id: args.category,
            image_url: args.image_url,
            is_active: !args.inactive,
        }
    }
}

impl From<ProductChanges> for ProductPatch {
    fn from(changes: ProductChanges) -> Self {
        ProductPatch {
            name: changes.name,
            description: changes.description,
            price: changes.price.map(Money::from_decimal),
            stock: changes.stock,
            category_id: changes.category,
            image_url: changes.image_url,
            is_active: changes.active,
        }
    }
}
