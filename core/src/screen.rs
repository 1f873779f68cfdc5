//! The product manager screen as a deterministic state machine.
//!
//! # Design
//! `ProductScreen` owns everything the single screen displays: the product
//! list (a transient cache, replaced wholesale on every successful load),
//! the form draft, the optional editing identifier, and the optional modal
//! alert. User operations return the `PendingRequest` the host must execute;
//! the host brings each outcome back through the matching `apply_*` method,
//! which performs the state transition and may hand back a follow-up
//! request (every successful mutation is followed by a reload).
//!
//! The screen imposes no concurrency control of its own: nothing stops a
//! host from dispatching a second submit while the first is in flight, and
//! there is no way to leave editing mode other than a successful submit.

use crate::client::ProductClient;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{coerce_price, format_price, Product, ProductInput};

/// Which remote operation a `PendingRequest` belongs to. The host routes
/// the finished outcome back through the matching `apply_*` method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Save,
    Delete,
}

/// A request the host must execute, tagged with its operation.
#[derive(Debug)]
pub struct PendingRequest {
    pub operation: Operation,
    pub request: HttpRequest,
}

/// The form fields as typed by the user, price still text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.description.is_empty() && self.price.is_empty()
    }
}

/// The modal alert, one static message per failed operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    LoadFailed,
    SaveFailed,
    DeleteFailed,
}

impl Alert {
    pub fn title(self) -> &'static str {
        "Error"
    }

    pub fn message(self) -> &'static str {
        match self {
            Alert::LoadFailed => "No se pudieron cargar los productos",
            Alert::SaveFailed => "No se pudo guardar el producto",
            Alert::DeleteFailed => "No se pudo eliminar el producto",
        }
    }
}

/// State of the single product manager screen.
pub struct ProductScreen {
    client: ProductClient,
    products: Vec<Product>,
    draft: Draft,
    editing_id: Option<String>,
    alert: Option<Alert>,
}

impl ProductScreen {
    pub fn new(client: ProductClient) -> Self {
        Self {
            client,
            products: Vec::new(),
            draft: Draft::default(),
            editing_id: None,
            alert: None,
        }
    }

    /// The initial fetch, issued once when the screen comes up.
    pub fn open(&self) -> PendingRequest {
        self.load_request()
    }

    /// The displayed list, in the order the server returned it.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// The host edits field text directly; the screen only consumes it at
    /// submit time.
    pub fn draft_mut(&mut self) -> &mut Draft {
        &mut self.draft
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    /// Submit affordance label, toggling with the editing identifier.
    pub fn submit_label(&self) -> &'static str {
        if self.editing_id.is_some() {
            "Actualizar Producto"
        } else {
            "Agregar Producto"
        }
    }

    pub fn alert(&self) -> Option<Alert> {
        self.alert
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    /// Copy the row's fields into the draft and mark it as being edited.
    /// Purely local; overwrites whatever the draft held. Returns `false`
    /// when the row does not exist or the modal alert is up.
    pub fn begin_edit(&mut self, index: usize) -> bool {
        if self.alert.is_some() {
            return false;
        }
        let Some(product) = self.products.get(index) else {
            return false;
        };
        self.draft.name = product.name.clone();
        self.draft.description = product.description.clone();
        self.draft.price = format_price(product.price);
        self.editing_id = Some(product.id.clone());
        true
    }

    /// Build the create-or-update request for the current draft: an update
    /// when an editing identifier is set, a creation otherwise. The draft is
    /// forwarded as-is, price coerced, with no validation.
    pub fn submit(&mut self) -> Option<PendingRequest> {
        if self.alert.is_some() {
            return None;
        }
        let input = ProductInput {
            name: self.draft.name.clone(),
            description: self.draft.description.clone(),
            price: coerce_price(&self.draft.price),
        };
        let built = match &self.editing_id {
            Some(id) => self.client.build_update_product(id, &input),
            None => self.client.build_create_product(&input),
        };
        match built {
            Ok(request) => Some(PendingRequest {
                operation: Operation::Save,
                request,
            }),
            Err(_) => {
                self.alert = Some(Alert::SaveFailed);
                None
            }
        }
    }

    /// Build the delete request for the row at `index`. The row stays in
    /// the displayed list until the follow-up reload confirms its fate.
    pub fn request_delete(&mut self, index: usize) -> Option<PendingRequest> {
        if self.alert.is_some() {
            return None;
        }
        let product = self.products.get(index)?;
        Some(PendingRequest {
            operation: Operation::Delete,
            request: self.client.build_delete_product(&product.id),
        })
    }

    /// Fold a finished load back in. Success replaces the list wholesale;
    /// failure leaves the previous list untouched and raises the alert.
    /// The error comes back to the caller so the host can log it.
    pub fn apply_load(&mut self, response: Result<HttpResponse, ApiError>) -> Result<(), ApiError> {
        match response.and_then(|r| self.client.parse_list_products(r)) {
            Ok(products) => {
                self.products = products;
                Ok(())
            }
            Err(error) => {
                self.alert = Some(Alert::LoadFailed);
                Err(error)
            }
        }
    }

    /// Fold a finished create/update back in. Success clears the draft,
    /// leaves editing mode and hands back the follow-up reload; failure
    /// keeps the draft and editing identifier intact and raises the alert.
    pub fn apply_save(
        &mut self,
        response: Result<HttpResponse, ApiError>,
    ) -> Result<PendingRequest, ApiError> {
        match response.and_then(|r| self.client.parse_saved(r)) {
            Ok(()) => {
                self.draft = Draft::default();
                self.editing_id = None;
                Ok(self.load_request())
            }
            Err(error) => {
                self.alert = Some(Alert::SaveFailed);
                Err(error)
            }
        }
    }

    /// Fold a finished delete back in. Success hands back the follow-up
    /// reload; failure raises the alert and the row stays visible.
    pub fn apply_delete(
        &mut self,
        response: Result<HttpResponse, ApiError>,
    ) -> Result<PendingRequest, ApiError> {
        match response.and_then(|r| self.client.parse_delete_product(r)) {
            Ok(()) => Ok(self.load_request()),
            Err(error) => {
                self.alert = Some(Alert::DeleteFailed);
                Err(error)
            }
        }
    }

    fn load_request(&self) -> PendingRequest {
        PendingRequest {
            operation: Operation::Load,
            request: self.client.build_list_products(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn screen() -> ProductScreen {
        ProductScreen::new(ProductClient::new("http://localhost:3000"))
    }

    fn ok_response(body: &str) -> Result<HttpResponse, ApiError> {
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    fn transport_error() -> Result<HttpResponse, ApiError> {
        Err(ApiError::RequestFailed("connection refused".to_string()))
    }

    const WIDGET_LIST: &str =
        r#"[{"_id":"1","nombreAMMA":"Widget","descripcionAMMA":"A widget","precio":9.99}]"#;

    fn screen_with_widget() -> ProductScreen {
        let mut s = screen();
        s.apply_load(ok_response(WIDGET_LIST)).unwrap();
        s
    }

    fn body_of(pending: &PendingRequest) -> serde_json::Value {
        serde_json::from_str(pending.request.body.as_deref().unwrap()).unwrap()
    }

    #[test]
    fn open_issues_a_list_request() {
        let pending = screen().open();
        assert_eq!(pending.operation, Operation::Load);
        assert_eq!(pending.request.method, HttpMethod::Get);
        assert_eq!(pending.request.path, "http://localhost:3000/productosAMMA");
    }

    #[test]
    fn successful_load_replaces_the_list_in_server_order() {
        let mut s = screen();
        s.apply_load(ok_response(
            r#"[
                {"_id":"b","nombreAMMA":"Segundo","descripcionAMMA":"s","precio":2.0},
                {"_id":"a","nombreAMMA":"Primero","descripcionAMMA":"p","precio":1.0}
            ]"#,
        ))
        .unwrap();
        let ids: Vec<&str> = s.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);

        s.apply_load(ok_response("[]")).unwrap();
        assert!(s.products().is_empty());
    }

    #[test]
    fn failed_first_load_alerts_and_leaves_the_list_empty() {
        let mut s = screen();
        let err = s.apply_load(transport_error()).unwrap_err();
        assert!(matches!(err, ApiError::RequestFailed(_)));
        assert!(s.products().is_empty());
        assert_eq!(s.alert(), Some(Alert::LoadFailed));
    }

    #[test]
    fn failed_load_keeps_the_previous_list() {
        let mut s = screen_with_widget();
        s.apply_load(transport_error()).unwrap_err();
        assert_eq!(s.products().len(), 1);
        assert_eq!(s.products()[0].name, "Widget");
        assert_eq!(s.alert(), Some(Alert::LoadFailed));
    }

    #[test]
    fn submit_without_editing_id_issues_a_creation() {
        let mut s = screen();
        s.draft_mut().name = "New".to_string();
        s.draft_mut().description = "Item".to_string();
        s.draft_mut().price = "5".to_string();

        let pending = s.submit().unwrap();
        assert_eq!(pending.operation, Operation::Save);
        assert_eq!(pending.request.method, HttpMethod::Post);
        assert_eq!(pending.request.path, "http://localhost:3000/productosAMMA");
        let body = body_of(&pending);
        assert_eq!(body["nombreAMMA"], "New");
        assert_eq!(body["descripcionAMMA"], "Item");
        assert_eq!(body["precio"], 5.0);
    }

    #[test]
    fn submit_with_editing_id_issues_an_update_to_that_identifier() {
        let mut s = screen_with_widget();
        assert!(s.begin_edit(0));
        s.draft_mut().price = "12.50".to_string();

        let pending = s.submit().unwrap();
        assert_eq!(pending.request.method, HttpMethod::Put);
        assert_eq!(pending.request.path, "http://localhost:3000/productosAMMA/1");
        let body = body_of(&pending);
        assert_eq!(body["nombreAMMA"], "Widget");
        assert_eq!(body["descripcionAMMA"], "A widget");
        assert_eq!(body["precio"], 12.5);
    }

    #[test]
    fn submit_forwards_the_draft_without_validation() {
        let mut s = screen();
        s.draft_mut().price = "gratis".to_string();
        let pending = s.submit().unwrap();
        let body = body_of(&pending);
        assert_eq!(body["nombreAMMA"], "");
        assert_eq!(body["descripcionAMMA"], "");
        assert_eq!(body["precio"], serde_json::Value::Null);
    }

    #[test]
    fn empty_price_submits_as_zero() {
        let mut s = screen();
        s.draft_mut().name = "Gratis".to_string();
        let pending = s.submit().unwrap();
        assert_eq!(body_of(&pending)["precio"], 0.0);
    }

    #[test]
    fn successful_save_clears_the_draft_and_reloads() {
        let mut s = screen_with_widget();
        s.begin_edit(0);
        s.draft_mut().price = "12.50".to_string();
        s.submit().unwrap();

        let reload = s
            .apply_save(Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: String::new(),
            }))
            .unwrap();
        assert!(s.draft().is_empty());
        assert_eq!(s.editing_id(), None);
        assert_eq!(s.submit_label(), "Agregar Producto");
        assert_eq!(reload.operation, Operation::Load);
        assert_eq!(reload.request.method, HttpMethod::Get);
    }

    #[test]
    fn failed_save_keeps_draft_and_editing_id() {
        let mut s = screen_with_widget();
        s.begin_edit(0);
        s.draft_mut().price = "12.50".to_string();
        s.submit().unwrap();

        let err = s.apply_save(transport_error()).unwrap_err();
        assert!(matches!(err, ApiError::RequestFailed(_)));
        assert_eq!(s.draft().name, "Widget");
        assert_eq!(s.draft().description, "A widget");
        assert_eq!(s.draft().price, "12.50");
        assert_eq!(s.editing_id(), Some("1"));
        assert_eq!(s.alert(), Some(Alert::SaveFailed));
        assert_eq!(s.submit_label(), "Actualizar Producto");
    }

    #[test]
    fn save_rejected_by_status_keeps_the_draft() {
        let mut s = screen();
        s.draft_mut().name = "New".to_string();
        let err = s
            .apply_save(Ok(HttpResponse {
                status: 500,
                headers: Vec::new(),
                body: "boom".to_string(),
            }))
            .unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
        assert_eq!(s.draft().name, "New");
        assert_eq!(s.alert(), Some(Alert::SaveFailed));
    }

    #[test]
    fn begin_edit_populates_the_draft_from_the_row() {
        let mut s = screen_with_widget();
        s.draft_mut().name = "half-typed junk".to_string();
        s.draft_mut().price = "0.01".to_string();

        assert!(s.begin_edit(0));
        assert_eq!(s.draft().name, "Widget");
        assert_eq!(s.draft().description, "A widget");
        assert_eq!(s.draft().price, "9.99");
        assert_eq!(s.editing_id(), Some("1"));
        assert_eq!(s.submit_label(), "Actualizar Producto");
    }

    #[test]
    fn begin_edit_again_overwrites_the_previous_edit() {
        let mut s = screen();
        s.apply_load(ok_response(
            r#"[
                {"_id":"1","nombreAMMA":"Widget","descripcionAMMA":"A widget","precio":9.99},
                {"_id":"2","nombreAMMA":"Gadget","descripcionAMMA":"A gadget","precio":5.0}
            ]"#,
        ))
        .unwrap();
        s.begin_edit(0);
        s.begin_edit(1);
        assert_eq!(s.draft().name, "Gadget");
        assert_eq!(s.draft().price, "5");
        assert_eq!(s.editing_id(), Some("2"));
    }

    #[test]
    fn begin_edit_out_of_bounds_changes_nothing() {
        let mut s = screen_with_widget();
        assert!(!s.begin_edit(7));
        assert!(s.draft().is_empty());
        assert_eq!(s.editing_id(), None);
    }

    #[test]
    fn delete_targets_the_row_identifier_and_keeps_the_row_visible() {
        let mut s = screen_with_widget();
        let pending = s.request_delete(0).unwrap();
        assert_eq!(pending.operation, Operation::Delete);
        assert_eq!(pending.request.method, HttpMethod::Delete);
        assert_eq!(pending.request.path, "http://localhost:3000/productosAMMA/1");
        assert_eq!(s.products().len(), 1);
    }

    #[test]
    fn successful_delete_reloads_and_the_reload_drops_the_row() {
        let mut s = screen_with_widget();
        s.request_delete(0).unwrap();
        let reload = s
            .apply_delete(Ok(HttpResponse {
                status: 204,
                headers: Vec::new(),
                body: String::new(),
            }))
            .unwrap();
        assert_eq!(reload.operation, Operation::Load);

        s.apply_load(ok_response("[]")).unwrap();
        assert!(s.products().is_empty());
    }

    #[test]
    fn failed_delete_alerts_and_keeps_the_row() {
        let mut s = screen_with_widget();
        s.request_delete(0).unwrap();
        s.apply_delete(transport_error()).unwrap_err();
        assert_eq!(s.products().len(), 1);
        assert_eq!(s.alert(), Some(Alert::DeleteFailed));
    }

    #[test]
    fn save_followed_by_failed_reload_still_clears_the_draft() {
        let mut s = screen_with_widget();
        s.begin_edit(0);
        s.submit().unwrap();
        let reload = s
            .apply_save(Ok(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: String::new(),
            }))
            .unwrap();
        assert_eq!(reload.operation, Operation::Load);
        assert!(s.draft().is_empty());

        s.apply_load(transport_error()).unwrap_err();
        assert!(s.draft().is_empty());
        assert_eq!(s.editing_id(), None);
        assert_eq!(s.alert(), Some(Alert::LoadFailed));
        assert_eq!(s.products().len(), 1);
    }

    #[test]
    fn alert_blocks_operations_until_dismissed() {
        let mut s = screen_with_widget();
        s.apply_load(transport_error()).unwrap_err();
        assert_eq!(s.alert(), Some(Alert::LoadFailed));

        assert!(s.submit().is_none());
        assert!(!s.begin_edit(0));
        assert!(s.request_delete(0).is_none());

        s.dismiss_alert();
        assert_eq!(s.alert(), None);
        assert!(s.begin_edit(0));
        assert!(s.submit().is_some());
    }

    #[test]
    fn alert_does_not_block_in_flight_results() {
        let mut s = screen_with_widget();
        s.apply_load(transport_error()).unwrap_err();
        assert_eq!(s.alert(), Some(Alert::LoadFailed));

        // A load dispatched earlier may still complete while the alert is
        // up; its result lands regardless.
        s.apply_load(ok_response("[]")).unwrap();
        assert!(s.products().is_empty());
        assert_eq!(s.alert(), Some(Alert::LoadFailed));
    }

    #[test]
    fn there_is_no_way_out_of_editing_except_a_successful_save() {
        let mut s = screen_with_widget();
        s.begin_edit(0);
        s.apply_save(transport_error()).unwrap_err();
        s.dismiss_alert();
        assert_eq!(s.editing_id(), Some("1"));
        assert_eq!(s.submit_label(), "Actualizar Producto");
    }

    #[test]
    fn alert_messages_match_the_screen_text() {
        assert_eq!(Alert::LoadFailed.title(), "Error");
        assert_eq!(
            Alert::LoadFailed.message(),
            "No se pudieron cargar los productos"
        );
        assert_eq!(Alert::SaveFailed.message(), "No se pudo guardar el producto");
        assert_eq!(
            Alert::DeleteFailed.message(),
            "No se pudo eliminar el producto"
        );
    }
}
