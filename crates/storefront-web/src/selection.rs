//! Selection State and Checkout Flow
//!
//! The page owns one [`Selection`]: the chosen package and whether a
//! checkout request is outstanding. [`run_checkout`] drives a single
//! attempt and always lowers the in-flight flag on the way out, including
//! when the future is dropped mid-request.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use storefront_core::Package;

use crate::api::CheckoutError;

/// Transient selection state for one visitor
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    selected: Option<Package>,
    in_flight: bool,
}

impl Selection {
    /// Replace the current selection
    pub fn select(&mut self, pkg: Package) {
        self.selected = Some(pkg);
    }

    pub const fn selected(&self) -> Option<&Package> {
        self.selected.as_ref()
    }

    pub fn is_selected(&self, pkg: &Package) -> bool {
        self.selected.as_ref().is_some_and(|s| s.same_entry(pkg))
    }

    pub const fn in_flight(&self) -> bool {
        self.in_flight
    }

    /// A package is chosen and nothing is outstanding
    pub const fn can_checkout(&self) -> bool {
        self.selected.is_some() && !self.in_flight
    }

    /// Start an attempt: raise the flag and hand out the package.
    /// `None` when checkout is not currently allowed.
    pub fn begin(&mut self) -> Option<Package> {
        if !self.can_checkout() {
            return None;
        }
        self.in_flight = true;
        self.selected.clone()
    }

    pub fn finish(&mut self) {
        self.in_flight = false;
    }
}

/// Somewhere a [`Selection`] lives (a reactive signal on the page, a plain
/// `RefCell` in tests).
pub trait SelectionCell {
    /// Apply `f`; `None` if the cell is gone
    fn modify<T>(&self, f: impl FnOnce(&mut Selection) -> T) -> Option<T>;
}

impl SelectionCell for Rc<RefCell<Selection>> {
    fn modify<T>(&self, f: impl FnOnce(&mut Selection) -> T) -> Option<T> {
        Some(f(&mut self.borrow_mut()))
    }
}

/// Sends the request that creates a checkout session
#[async_trait(?Send)]
pub trait CheckoutApi {
    /// Returns the provider session id
    async fn create_session(&self, pkg: &Package) -> Result<String, CheckoutError>;
}

/// Sends the browser to the hosted checkout page
#[async_trait(?Send)]
pub trait Redirector {
    async fn redirect_to_checkout(&self, session_id: &str) -> Result<(), CheckoutError>;
}

/// Result of one checkout attempt
#[derive(Debug, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// Nothing selected, or a request already outstanding. Nothing was sent.
    Skipped,
    /// Redirect issued for this session id
    Redirected(String),
    Failed(CheckoutError),
}

/// Lowers the in-flight flag when dropped
struct InFlightGuard<'a, C: SelectionCell> {
    cell: &'a C,
}

impl<C: SelectionCell> Drop for InFlightGuard<'_, C> {
    fn drop(&mut self) {
        self.cell.modify(Selection::finish);
    }
}

/// Run one checkout attempt for the current selection.
pub async fn run_checkout<C, A, R>(cell: &C, api: &A, redirector: &R) -> CheckoutOutcome
where
    C: SelectionCell,
    A: CheckoutApi + ?Sized,
    R: Redirector + ?Sized,
{
    let Some(pkg) = cell.modify(Selection::begin).flatten() else {
        return CheckoutOutcome::Skipped;
    };
    let _guard = InFlightGuard { cell };

    let result: Result<String, CheckoutError> = async {
        let session_id = api.create_session(&pkg).await?;
        redirector.redirect_to_checkout(&session_id).await?;
        Ok(session_id)
    }
    .await;

    match result {
        Ok(session_id) => CheckoutOutcome::Redirected(session_id),
        Err(err) => CheckoutOutcome::Failed(err),
    }
}
