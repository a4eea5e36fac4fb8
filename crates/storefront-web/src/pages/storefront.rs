//! Storefront Page

use leptos::prelude::*;
use leptos_router::hooks::use_query_map;
use storefront_core::{Catalog, EDITING_MINIMUM_NOTE};

use crate::api::HttpCheckoutApi;
use crate::components::{Banner, PackageOption};
use crate::selection::{CheckoutOutcome, Selection, SelectionCell, run_checkout};
use crate::stripe_js::StripeJsRedirector;

impl SelectionCell for RwSignal<Selection> {
    fn modify<T>(&self, f: impl FnOnce(&mut Selection) -> T) -> Option<T> {
        self.try_update(f)
    }
}

/// Where Stripe sent the visitor back from
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReturnStatus {
    Success,
    Canceled,
}

/// Read the `success=1` / `canceled=1` markers
pub fn return_status(success: Option<&str>, canceled: Option<&str>) -> Option<ReturnStatus> {
    match (success, canceled) {
        (Some("1"), _) => Some(ReturnStatus::Success),
        (_, Some("1")) => Some(ReturnStatus::Canceled),
        _ => None,
    }
}

#[component]
pub fn StorefrontPage() -> impl IntoView {
    let catalog = Catalog::standard();
    let selection = RwSignal::new(Selection::default());
    let query = use_query_map();

    let status = move || {
        query.with(|q| return_status(q.get("success").as_deref(), q.get("canceled").as_deref()))
    };

    let checkout = move |_: leptos::ev::MouseEvent| {
        leptos::task::spawn_local(async move {
            let api = HttpCheckoutApi::from_window();
            let redirector = StripeJsRedirector::new(api.clone());

            if let CheckoutOutcome::Failed(err) = run_checkout(&selection, &api, &redirector).await {
                leptos::logging::warn!("checkout failed: {err}");
                if let Some(window) = web_sys::window() {
                    let _ = window.alert_with_message(&err.user_message());
                }
            }
        });
    };

    let columns = catalog
        .groups()
        .into_iter()
        .map(|group| {
            let options = catalog
                .in_group(group)
                .cloned()
                .map(|package| view! { <PackageOption package=package selection=selection /> })
                .collect_view();

            view! {
                <div class="column">
                    <h2>{group.label()}</h2>
                    {options}
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="page">
            <div class="card">
                <img src="/logo.svg" alt="Brown Branding" class="logo" />
                {move || match status() {
                    Some(ReturnStatus::Success) => {
                        Some(view! { <Banner kind="success" message="Payment received, thank you!" /> })
                    }
                    Some(ReturnStatus::Canceled) => {
                        Some(view! { <Banner kind="canceled" message="Checkout canceled. Your card was not charged." /> })
                    }
                    None => None,
                }}
                <h1 class="title">"Choose your package"</h1>
                <div class="columns">{columns}</div>
                <button
                    class="checkout"
                    disabled=move || !selection.with(Selection::can_checkout)
                    on:click=checkout
                >
                    {move || {
                        if selection.with(Selection::in_flight) {
                            "Preparing checkout\u{2026}"
                        } else {
                            "Checkout with Stripe"
                        }
                    }}
                </button>
                <p class="note">{EDITING_MINIMUM_NOTE}</p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_return_status() {
        assert_eq!(return_status(Some("1"), None), Some(ReturnStatus::Success));
        assert_eq!(return_status(None, Some("1")), Some(ReturnStatus::Canceled));
        assert_eq!(return_status(Some("0"), None), None);
        assert_eq!(return_status(None, None), None);
    }
}
