use crate::domain::{a005_purchase_requisition, a006_purchase_order::api};
use crate::shared::date_utils::today_iso;
use crate::shared::document_lines::{LineCatalog, LineRowsState};
use crate::shared::form_utils::opt;
use crate::shared::notifications::use_notifications;
use crate::shared::reference::{fetch_suppliers, fetch_warehouses, load_into};
use contracts::domain::a006_purchase_order::{PurchaseOrder, PurchaseOrderDto};
use contracts::shared::{ReferenceItem, TokenPresentation};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct OrderDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub document_no: RwSignal<String>,
    pub document_date: RwSignal<String>,
    pub supplier_id: RwSignal<String>,
    pub warehouse_id: RwSignal<String>,
    pub expected_date: RwSignal<String>,
    pub notes: RwSignal<String>,

    /// Заявка-основание и её номер для шапки
    pub requisition_id: RwSignal<Option<String>>,
    pub requisition_no: RwSignal<String>,

    pub status: RwSignal<Option<TokenPresentation>>,
    pub is_editable: RwSignal<bool>,

    pub rows: RwSignal<LineRowsState>,
    pub catalog: LineCatalog,
    pub suppliers: RwSignal<Vec<ReferenceItem>>,
    pub warehouses: RwSignal<Vec<ReferenceItem>>,

    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl OrderDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            document_no: RwSignal::new(String::new()),
            document_date: RwSignal::new(today_iso()),
            supplier_id: RwSignal::new(String::new()),
            warehouse_id: RwSignal::new(String::new()),
            expected_date: RwSignal::new(String::new()),
            notes: RwSignal::new(String::new()),
            requisition_id: RwSignal::new(None),
            requisition_no: RwSignal::new(String::new()),
            status: RwSignal::new(None),
            is_editable: RwSignal::new(true),
            rows: RwSignal::new(LineRowsState::new()),
            catalog: LineCatalog::new(),
            suppliers: RwSignal::new(Vec::new()),
            warehouses: RwSignal::new(Vec::new()),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }

    pub fn is_edit_mode(&self) -> Signal<bool> {
        let id = self.id;
        Signal::derive(move || id.get().is_some())
    }

    pub fn read_only(&self) -> Signal<bool> {
        let editable = self.is_editable;
        Signal::derive(move || !editable.get())
    }

    pub fn load_references(&self) {
        self.catalog.load_references();
        load_into(self.suppliers, fetch_suppliers);
        load_into(self.warehouses, fetch_warehouses);
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.id.set(Some(id.clone()));
        spawn_local(async move {
            match api::fetch_by_id(&id).await {
                Ok(o) => {
                    this.fill(&o);
                    if let Some(req_id) = o.requisition_id.as_deref() {
                        this.load_requisition_no(req_id.to_string());
                    }
                }
                Err(e) => {
                    let _ = this.error.try_set(Some(e.to_string()));
                }
            }
            let _ = this.loading.try_set(false);
        });
    }

    /// Новый заказ по заявке: склад, дата поставки и строки из заявки
    pub fn prefill_from_requisition(&self, requisition_id: String) {
        let this = *self;
        this.loading.set(true);
        spawn_local(async move {
            match a005_purchase_requisition::api::fetch_by_id(&requisition_id).await {
                Ok(req) => {
                    let dto = PurchaseOrderDto::from_requisition(&req, &today_iso());
                    this.apply_dto(&dto);
                    let _ = this.requisition_no.try_set(req.document_no.clone());
                }
                Err(e) => {
                    let _ = this.error.try_set(Some(format!("Заявка-основание не загружена: {}", e)));
                }
            }
            let _ = this.loading.try_set(false);
        });
    }

    fn load_requisition_no(&self, requisition_id: String) {
        let requisition_no = self.requisition_no;
        spawn_local(async move {
            match a005_purchase_requisition::api::fetch_by_id(&requisition_id).await {
                Ok(req) => {
                    let _ = requisition_no.try_set(req.document_no);
                }
                Err(e) => log::warn!("source requisition {} not loaded: {}", requisition_id, e),
            }
        });
    }

    pub fn to_dto(&self) -> PurchaseOrderDto {
        PurchaseOrderDto {
            id: self.id.get_untracked(),
            document_no: self.document_no.get_untracked().trim().to_string(),
            document_date: self.document_date.get_untracked(),
            supplier_id: self.supplier_id.get_untracked(),
            warehouse_id: self.warehouse_id.get_untracked(),
            expected_date: opt(self.expected_date.get_untracked()),
            requisition_id: self.requisition_id.get_untracked(),
            notes: opt(self.notes.get_untracked()),
            lines: self.rows.with_untracked(|r| r.to_lines()),
        }
    }

    pub fn save(&self, on_saved: Callback<PurchaseOrder>) {
        if self.saving.get_untracked() {
            return;
        }
        let dto = self.to_dto();
        if let Err(e) = dto.validate_for_save(self.catalog.registered_units()) {
            self.error.set(Some(e.to_string()));
            return;
        }

        let this = *self;
        let notifications = use_notifications();
        this.saving.set(true);
        this.error.set(None);
        spawn_local(async move {
            match api::save(&dto).await {
                Ok(o) => {
                    this.fill(&o);
                    notifications.success(format!("Заказ {} сохранён", o.document_no));
                    on_saved.run(o);
                }
                Err(e) => notifications.route(e, this.error),
            }
            let _ = this.saving.try_set(false);
        });
    }

    fn apply_dto(&self, dto: &PurchaseOrderDto) {
        let _ = self.id.try_set(dto.id.clone());
        let _ = self.document_no.try_set(dto.document_no.clone());
        let _ = self.document_date.try_set(dto.document_date.clone());
        let _ = self.supplier_id.try_set(dto.supplier_id.clone());
        let _ = self.warehouse_id.try_set(dto.warehouse_id.clone());
        let _ = self.expected_date.try_set(dto.expected_date.clone().unwrap_or_default());
        let _ = self.requisition_id.try_set(dto.requisition_id.clone());
        let _ = self.notes.try_set(dto.notes.clone().unwrap_or_default());
        let _ = self.rows.try_set(LineRowsState::from_lines(&dto.lines));
    }

    fn fill(&self, o: &PurchaseOrder) {
        self.apply_dto(&PurchaseOrderDto::from(o));
        let _ = self.status.try_set(Some(o.status_presentation()));
        let _ = self.is_editable.try_set(o.is_editable);
    }
}
