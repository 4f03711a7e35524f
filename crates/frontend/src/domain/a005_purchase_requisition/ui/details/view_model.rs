use crate::domain::a005_purchase_requisition::api;
use crate::shared::date_utils::today_iso;
use crate::shared::document_lines::{LineCatalog, LineRowsState};
use crate::shared::form_utils::opt;
use crate::shared::notifications::use_notifications;
use crate::shared::reference::{fetch_warehouses, load_into};
use contracts::domain::a005_purchase_requisition::{PurchaseRequisition, PurchaseRequisitionDto};
use contracts::shared::{ReferenceItem, TokenPresentation};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Clone, Copy)]
pub struct RequisitionDetailsVm {
    pub id: RwSignal<Option<String>>,
    pub document_no: RwSignal<String>,
    pub document_date: RwSignal<String>,
    pub requester_name: RwSignal<String>,
    pub department_name: RwSignal<String>,
    pub warehouse_id: RwSignal<String>,
    pub required_date: RwSignal<String>,
    pub notes: RwSignal<String>,

    /// Статус и флаги от сервера
    pub status: RwSignal<Option<TokenPresentation>>,
    pub is_editable: RwSignal<bool>,
    pub workflow_instance_id: RwSignal<Option<String>>,

    pub rows: RwSignal<LineRowsState>,
    pub catalog: LineCatalog,
    pub warehouses: RwSignal<Vec<ReferenceItem>>,

    pub active_tab: RwSignal<&'static str>,
    pub loading: RwSignal<bool>,
    pub saving: RwSignal<bool>,
    pub submitting: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl RequisitionDetailsVm {
    pub fn new() -> Self {
        Self {
            id: RwSignal::new(None),
            document_no: RwSignal::new(String::new()),
            document_date: RwSignal::new(today_iso()),
            requester_name: RwSignal::new(String::new()),
            department_name: RwSignal::new(String::new()),
            warehouse_id: RwSignal::new(String::new()),
            required_date: RwSignal::new(String::new()),
            notes: RwSignal::new(String::new()),
            status: RwSignal::new(None),
            is_editable: RwSignal::new(true),
            workflow_instance_id: RwSignal::new(None),
            rows: RwSignal::new(LineRowsState::new()),
            catalog: LineCatalog::new(),
            warehouses: RwSignal::new(Vec::new()),
            active_tab: RwSignal::new("document"),
            loading: RwSignal::new(false),
            saving: RwSignal::new(false),
            submitting: RwSignal::new(false),
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

    /// Сохранённая заявка без запущенного процесса
    pub fn can_submit(&self) -> Signal<bool> {
        let this = *self;
        Signal::derive(move || {
            this.id.get().is_some()
                && this.workflow_instance_id.get().is_none()
                && this.is_editable.get()
        })
    }

    pub fn set_tab(&self, tab: &'static str) {
        self.active_tab.set(tab);
    }

    pub fn load_references(&self) {
        self.catalog.load_references();
        load_into(self.warehouses, fetch_warehouses);
    }

    pub fn load(&self, id: String) {
        let this = *self;
        this.loading.set(true);
        this.id.set(Some(id.clone()));
        spawn_local(async move {
            match api::fetch_by_id(&id).await {
                Ok(r) => this.fill(&r),
                Err(e) => {
                    let _ = this.error.try_set(Some(e.to_string()));
                }
            }
            let _ = this.loading.try_set(false);
        });
    }

    /// Перечитать заявку после действия в процессе согласования.
    /// Без индикатора загрузки: открытая панель процесса не пересоздаётся.
    pub fn reload(&self) {
        let Some(id) = self.id.get_untracked() else {
            return;
        };
        let this = *self;
        spawn_local(async move {
            match api::fetch_by_id(&id).await {
                Ok(r) => this.fill(&r),
                Err(e) => log::warn!("requisition {} reload failed: {}", id, e),
            }
        });
    }

    pub fn to_dto(&self) -> PurchaseRequisitionDto {
        PurchaseRequisitionDto {
            id: self.id.get_untracked(),
            document_no: self.document_no.get_untracked().trim().to_string(),
            document_date: self.document_date.get_untracked(),
            requester_name: self.requester_name.get_untracked().trim().to_string(),
            department_name: opt(self.department_name.get_untracked()),
            warehouse_id: self.warehouse_id.get_untracked(),
            required_date: opt(self.required_date.get_untracked()),
            notes: opt(self.notes.get_untracked()),
            lines: self.rows.with_untracked(|r| r.to_lines()),
        }
    }

    pub fn save(&self, on_saved: Callback<PurchaseRequisition>) {
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
                Ok(r) => {
                    this.fill(&r);
                    notifications.success(format!("Заявка {} сохранена", r.document_no));
                    on_saved.run(r);
                }
                Err(e) => notifications.route(e, this.error),
            }
            let _ = this.saving.try_set(false);
        });
    }

    /// Отправить на согласование и открыть вкладку процесса
    pub fn submit(&self) {
        if self.submitting.get_untracked() {
            return;
        }
        let Some(id) = self.id.get_untracked() else {
            return;
        };

        let this = *self;
        let notifications = use_notifications();
        this.submitting.set(true);
        this.error.set(None);
        spawn_local(async move {
            match api::submit(&id).await {
                Ok(r) => {
                    this.fill(&r);
                    notifications.success("Заявка отправлена на согласование");
                    if r.workflow_instance_id.is_some() {
                        let _ = this.active_tab.try_set("workflow");
                    }
                }
                Err(e) => notifications.route(e, this.error),
            }
            let _ = this.submitting.try_set(false);
        });
    }

    fn fill(&self, r: &PurchaseRequisition) {
        let _ = self.id.try_set(Some(r.to_string_id()));
        let _ = self.document_no.try_set(r.document_no.clone());
        let _ = self.document_date.try_set(r.document_date.clone());
        let _ = self.requester_name.try_set(r.requester_name.clone());
        let _ = self.department_name.try_set(r.department_name.clone().unwrap_or_default());
        let _ = self.warehouse_id.try_set(r.warehouse_id.clone());
        let _ = self.required_date.try_set(r.required_date.clone().unwrap_or_default());
        let _ = self.notes.try_set(r.notes.clone().unwrap_or_default());
        let _ = self.status.try_set(Some(r.status_presentation()));
        let _ = self.is_editable.try_set(r.is_editable);
        let _ = self.workflow_instance_id.try_set(r.workflow_instance_id.clone());
        let _ = self.rows.try_set(LineRowsState::from_lines(&r.lines));
    }
}
