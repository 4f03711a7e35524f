use super::{open_add_unit_dialog, unit_label};
use crate::domain::{a001_unit, a004_unit_conversion::api};
use crate::shared::form_utils::{confirm, number_from_text};
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::{format_factor, format_quantity};
use contracts::domain::a001_unit::Unit;
use contracts::domain::a004_unit_conversion::{
    MaterialUnitSet, RemoveMaterialUnitRequest, SetBaseUnitRequest,
};
use contracts::shared::ApiError;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Таблица «было / станет» для подтверждения смены базовой единицы
pub fn rebase_rows(
    set: &MaterialUnitSet,
    new_base_id: &str,
    units: &[Unit],
) -> Result<Vec<(String, f64, f64)>, ApiError> {
    let after = set.rebase_preview(new_base_id)?;
    Ok(set
        .units()
        .iter()
        .filter_map(|mu| {
            after
                .find(&mu.unit_id)
                .map(|new| (unit_label(mu, units), mu.factor(), new.factor()))
        })
        .collect())
}

/// Вкладка «Единицы» карточки материала
#[component]
pub fn MaterialUnitsPanel(material_id: String) -> impl IntoView {
    let notifications = use_notifications();
    let modal_stack =
        use_context::<ModalStackService>().expect("ModalStackService not found in context");

    let material_id = StoredValue::new(material_id);
    let set = RwSignal::new(MaterialUnitSet::new(material_id.get_value(), Vec::new()));
    let units = RwSignal::new(Vec::<Unit>::new());
    let loading = RwSignal::new(false);
    let busy = RwSignal::new(false);
    // набор с сервера получен; до этого пустой набор ничего не значит
    let loaded = RwSignal::new(false);

    let reload = move || {
        loading.set(true);
        let id = material_id.get_value();
        spawn_local(async move {
            match api::get_units_for_material(&id).await {
                Ok(s) => {
                    let _ = set.try_set(s);
                    let _ = loaded.try_set(true);
                }
                Err(e) => {
                    let _ = loaded.try_set(false);
                    notifications.report(&e);
                }
            }
            let _ = loading.try_set(false);
        });
    };

    spawn_local(async move {
        match a001_unit::api::fetch_list().await {
            Ok(list) => {
                let _ = units.try_set(list);
            }
            Err(e) => log::warn!("units not loaded: {}", e),
        }
    });
    reload();

    let integrity_error = Signal::derive(move || set.with(|s| s.validate().err().map(|e| e.to_string())));

    let add_unit = move |_| {
        if !loaded.get_untracked() {
            return;
        }
        open_add_unit_dialog(
            modal_stack,
            set.get_untracked(),
            units.get_untracked(),
            false,
            Callback::new(move |_| reload()),
        );
    };

    let remove_unit = move |unit_id: String, label: String| {
        if busy.get_untracked() {
            return;
        }
        if let Err(e) = set.with_untracked(|s| s.check_remove(&unit_id)) {
            notifications.warning(e.to_string());
            return;
        }
        if !confirm(&format!("Отвязать единицу «{}» от материала?", label)) {
            return;
        }
        let request = RemoveMaterialUnitRequest {
            material_id: material_id.get_value(),
            unit_id,
        };
        busy.set(true);
        spawn_local(async move {
            match api::remove_unit(&request).await {
                Ok(()) => {
                    notifications.success("Единица отвязана");
                    reload();
                }
                Err(e) => notifications.report(&e),
            }
            let _ = busy.try_set(false);
        });
    };

    let send_set_base = move |unit_id: String| {
        let request = SetBaseUnitRequest {
            material_id: material_id.get_value(),
            unit_id,
        };
        busy.set(true);
        spawn_local(async move {
            match api::set_base(&request).await {
                Ok(()) => {
                    notifications.success("Базовая единица изменена");
                    reload();
                }
                Err(e) => notifications.report(&e),
            }
            let _ = busy.try_set(false);
        });
    };

    let make_base = move |unit_id: String, label: String| {
        if busy.get_untracked() {
            return;
        }
        match set.with_untracked(|s| s.check_set_base(&unit_id)) {
            Err(e) => {
                notifications.warning(e.to_string());
                return;
            }
            Ok(false) => {
                notifications.warning(format!("«{}» уже базовая единица", label));
                return;
            }
            Ok(true) => {}
        }
        let rows = match set.with_untracked(|s| units.with_untracked(|u| rebase_rows(s, &unit_id, u))) {
            Ok(rows) => rows,
            Err(e) => {
                notifications.warning(e.to_string());
                return;
            }
        };

        modal_stack.push_with_frame(
            Some("max-width: min(560px, 95vw); width: min(560px, 95vw);".to_string()),
            None,
            move |handle| {
                let unit_id = unit_id.clone();
                view! {
                    <div class="modal-header">
                        <h2 class="modal-title">{format!("Сделать «{}» базовой", label)}</h2>
                    </div>
                    <div class="modal-body">
                        <p>"Коэффициенты единиц материала будут пересчитаны относительно новой базовой:"</p>
                        <table class="simple-table">
                            <thead>
                                <tr><th>"Единица"</th><th>"Сейчас"</th><th>"Станет"</th></tr>
                            </thead>
                            <tbody>
                                {rows.iter().map(|(name, before, after)| view! {
                                    <tr>
                                        <td>{name.clone()}</td>
                                        <td style="text-align: right;">{format_factor(*before)}</td>
                                        <td style="text-align: right;">{format_factor(*after)}</td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    </div>
                    <div class="modal-footer">
                        <Space>
                            <Button
                                appearance=ButtonAppearance::Primary
                                on_click=move |_| {
                                    handle.close();
                                    send_set_base(unit_id.clone());
                                }
                            >
                                {icon("check")}
                                " Подтвердить"
                            </Button>
                            <Button appearance=ButtonAppearance::Secondary on_click=move |_| handle.close()>
                                "Отмена"
                            </Button>
                        </Space>
                    </div>
                }
                .into_any()
            },
        );
    };

    // Пересчёт внутри материала: qty × f(from) / f(to)
    let quantity = RwSignal::new("1".to_string());
    let from_unit = RwSignal::new(String::new());
    let to_unit = RwSignal::new(String::new());
    let converted = Signal::derive(move || {
        let (from, to) = (from_unit.get(), to_unit.get());
        if from.is_empty() || to.is_empty() {
            return None;
        }
        let qty = number_from_text(&quantity.get());
        if !qty.is_finite() {
            return Some(Err("Некорректное количество".to_string()));
        }
        Some(set.with(|s| s.convert(qty, &from, &to)).map_err(|e| e.to_string()))
    });
    let unit_select = move |target: RwSignal<String>| {
        view! {
            <select class="form__select" on:change=move |ev| target.set(event_target_value(&ev))>
                <option value="" selected=move || target.get().is_empty()>"—"</option>
                {move || {
                    let current = target.get();
                    let list = units.get();
                    set.with(|s| {
                        s.units()
                            .iter()
                            .map(|mu| {
                                let selected = mu.unit_id == current;
                                view! {
                                    <option value=mu.unit_id.clone() selected=selected>{unit_label(mu, &list)}</option>
                                }
                            })
                            .collect_view()
                    })
                }}
            </select>
        }
    };

    view! {
        <div class="details-section">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h3 class="details-section__title">"Единицы измерения материала"</h3>
                <Space>
                    <Button appearance=ButtonAppearance::Primary on_click=add_unit disabled=Signal::derive(move || busy.get() || !loaded.get())>
                        {icon("plus")}
                        {move || if set.with(|s| s.needs_configuration()) { " Добавить базовую" } else { " Добавить" }}
                    </Button>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| reload() disabled=Signal::derive(move || loading.get())>
                        {icon("refresh")}
                    </Button>
                </Space>
            </Flex>

            {move || integrity_error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Warning>
                    <MessageBarBody>{e}</MessageBarBody>
                </MessageBar>
            })}

            <Show
                when=move || !set.with(|s| s.needs_configuration())
                fallback=move || view! {
                    <div class="placeholder">
                        {move || if loading.get() {
                            "Загрузка..."
                        } else if !loaded.get() {
                            "Единицы материала не загрузились. Обновите список."
                        } else {
                            "Единицы не настроены. Добавьте базовую единицу."
                        }}
                    </div>
                }
            >
                <Table attr:style="width: 100%;">
                    <TableHeader>
                        <TableRow>
                            <TableHeaderCell min_width=220.0>"Единица"</TableHeaderCell>
                            <TableHeaderCell min_width=140.0>"Коэффициент к базовой"</TableHeaderCell>
                            <TableHeaderCell min_width=100.0>"Базовая"</TableHeaderCell>
                            <TableHeaderCell min_width=220.0>"Действия"</TableHeaderCell>
                        </TableRow>
                    </TableHeader>
                    <TableBody>
                        <For
                            each=move || set.with(|s| s.units().to_vec())
                            key=|mu| (mu.unit_id.clone(), mu.is_base_unit, mu.factor().to_bits())
                            children=move |mu| {
                                let label = units.with_untracked(|u| unit_label(&mu, u));
                                let is_base = mu.is_base_unit;
                                let id_for_base = mu.unit_id.clone();
                                let id_for_remove = mu.unit_id.clone();
                                let label_for_base = label.clone();
                                let label_for_remove = label.clone();
                                view! {
                                    <TableRow>
                                        <TableCell><TableCellLayout>{label}</TableCellLayout></TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <span style="font-variant-numeric: tabular-nums;">{format_factor(mu.factor())}</span>
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                {is_base.then(|| view! {
                                                    <Badge appearance=BadgeAppearance::Tint color=BadgeColor::Brand>"базовая"</Badge>
                                                })}
                                            </TableCellLayout>
                                        </TableCell>
                                        <TableCell>
                                            <TableCellLayout>
                                                <Show when=move || !is_base>
                                                    {
                                                        let id_for_base = id_for_base.clone();
                                                        let id_for_remove = id_for_remove.clone();
                                                        let label_for_base = label_for_base.clone();
                                                        let label_for_remove = label_for_remove.clone();
                                                        view! {
                                                            <Space>
                                                                <Button
                                                                    size=ButtonSize::Small
                                                                    appearance=ButtonAppearance::Subtle
                                                                    on_click={
                                                                        let id = id_for_base.clone();
                                                                        let label = label_for_base.clone();
                                                                        move |_| make_base(id.clone(), label.clone())
                                                                    }
                                                                >
                                                                    {icon("star")}
                                                                    " Сделать базовой"
                                                                </Button>
                                                                <Button
                                                                    size=ButtonSize::Small
                                                                    appearance=ButtonAppearance::Subtle
                                                                    on_click={
                                                                        let id = id_for_remove.clone();
                                                                        let label = label_for_remove.clone();
                                                                        move |_| remove_unit(id.clone(), label.clone())
                                                                    }
                                                                >
                                                                    {icon("trash")}
                                                                    " Отвязать"
                                                                </Button>
                                                            </Space>
                                                        }
                                                    }
                                                </Show>
                                            </TableCellLayout>
                                        </TableCell>
                                    </TableRow>
                                }
                            }
                        />
                    </TableBody>
                </Table>

                <div class="details-section">
                    <h4 class="details-section__title">"Пересчёт"</h4>
                    <Flex gap=FlexGap::Small align=FlexAlign::Center>
                        <div style="width: 120px;">
                            <Input value=quantity attr:inputmode="decimal" />
                        </div>
                        {unit_select(from_unit)}
                        <span>"→"</span>
                        {unit_select(to_unit)}
                        <span>"="</span>
                        {move || match converted.get() {
                            None => view! { <span class="form__hint">"выберите единицы"</span> }.into_any(),
                            Some(Ok(v)) => view! { <strong>{format_quantity(v)}</strong> }.into_any(),
                            Some(Err(msg)) => view! { <span class="form__error">{msg}</span> }.into_any(),
                        }}
                    </Flex>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_unit_conversion::MaterialUnit;

    #[test]
    fn test_rebase_rows_keep_new_base_at_one() {
        let set = MaterialUnitSet::new(
            "m1",
            vec![
                MaterialUnit::new("m1", "kg", true, 1.0),
                MaterialUnit::new("m1", "t", false, 1000.0),
            ],
        );
        let rows = rebase_rows(&set, "t", &[]).unwrap();
        assert_eq!(rows.len(), 2);
        let kg = rows.iter().find(|r| r.0 == "kg").unwrap();
        let t = rows.iter().find(|r| r.0 == "t").unwrap();
        assert_eq!((kg.1, kg.2), (1.0, 0.001));
        assert_eq!((t.1, t.2), (1000.0, 1.0));
    }

    #[test]
    fn test_rebase_rows_reject_unbound_unit() {
        let set = MaterialUnitSet::new("m1", vec![MaterialUnit::new("m1", "kg", true, 1.0)]);
        assert!(rebase_rows(&set, "box", &[]).is_err());
    }
}
