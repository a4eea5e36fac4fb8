//! UI Components

use leptos::prelude::*;
use rust_decimal::Decimal;
use storefront_core::Package;

use crate::selection::Selection;

/// `$250`, `$99.99`
pub fn format_price(price: Decimal) -> String {
    format!("${}", price.normalize())
}

/// One selectable package row
#[component]
pub fn PackageOption(package: Package, selection: RwSignal<Selection>) -> impl IntoView {
    let name = package.name.clone();
    let price = format_price(package.price);
    let chosen = package.clone();
    let active = move || selection.with(|s| s.is_selected(&package));

    view! {
        <button
            class="option"
            class:active=active
            on:click=move |_| selection.update(|s| s.select(chosen.clone()))
        >
            <span>{name}</span>
            <span>{price}</span>
        </button>
    }
}

/// Message shown after Stripe sends the visitor back
#[component]
pub fn Banner(kind: &'static str, message: &'static str) -> impl IntoView {
    view! { <div class=format!("banner banner-{kind}")>{message}</div> }
}
