use super::{available_units, unit_label};
use crate::domain::a004_unit_conversion::api;
use crate::shared::form_utils::number_from_text;
use crate::shared::icons::icon;
use crate::shared::modal_stack::ModalStackService;
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::format_factor;
use crate::shared::reference::ReferenceSelect;
use contracts::domain::a001_unit::Unit;
use contracts::domain::a004_unit_conversion::{AddUnitPlan, MaterialUnitSet};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

/// Подпись поля коэффициента; `None`, когда коэффициент не вводится
/// (первая единица материала всегда базовая с коэффициентом 1)
pub fn factor_caption(set: &MaterialUnitSet, units: &[Unit], is_base: bool) -> Option<String> {
    let base = set.base_unit()?;
    let base_label = unit_label(base, units);
    Some(if is_base {
        format!("Сколько «{}» в одной новой базовой единице", base_label)
    } else {
        format!("Сколько «{}» в одной добавляемой единице", base_label)
    })
}

/// План добавления и набор после него
pub fn prepare(
    set: &MaterialUnitSet,
    unit_id: &str,
    is_base: bool,
    factor_text: &str,
) -> Result<(AddUnitPlan, MaterialUnitSet), String> {
    if unit_id.trim().is_empty() {
        return Err("Выберите единицу измерения".to_string());
    }
    let factor = if set.base_unit().is_some() {
        number_from_text(factor_text)
    } else {
        1.0
    };
    let plan = set
        .plan_add(unit_id, is_base, factor)
        .map_err(|e| e.to_string())?;
    let after = set.apply_add(&plan);
    after.validate().map_err(|e| e.to_string())?;
    Ok((plan, after))
}

/// Открыть окно добавления единицы к материалу.
///
/// `base_only` фиксирует «базовая = да» (материал ещё не настроен).
/// `on_done` вызывается после успешного сохранения.
pub fn open_add_unit_dialog(
    modal_stack: ModalStackService,
    set: MaterialUnitSet,
    units: Vec<Unit>,
    base_only: bool,
    on_done: Callback<()>,
) {
    modal_stack.push_with_frame(
        Some("max-width: min(640px, 95vw); width: min(640px, 95vw);".to_string()),
        Some("material-unit-modal".to_string()),
        move |handle| {
            view! {
                <AddUnitDialog
                    set=set.clone()
                    units=units.clone()
                    base_only=base_only
                    on_done=Callback::new(move |_| {
                        handle.close();
                        on_done.run(());
                    })
                    on_cancel=Callback::new(move |_| handle.close())
                />
            }
            .into_any()
        },
    );
}

#[component]
fn AddUnitDialog(
    set: MaterialUnitSet,
    units: Vec<Unit>,
    base_only: bool,
    on_done: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let notifications = use_notifications();
    let first_unit = set.needs_configuration();
    let fixed_base = base_only || first_unit;

    let set = StoredValue::new(set);
    let units = StoredValue::new(units);
    let unit_id = RwSignal::new(String::new());
    let is_base = RwSignal::new(fixed_base);
    let factor = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    let options = Signal::derive(move || {
        set.with_value(|s| units.with_value(|u| available_units(s, u)))
    });
    let caption = Signal::derive(move || {
        let base = is_base.get();
        set.with_value(|s| units.with_value(|u| factor_caption(s, u, base)))
    });
    let supersede_warning = Signal::derive(move || {
        if !is_base.get() {
            return None;
        }
        set.with_value(|s| {
            s.base_unit().map(|old| {
                format!(
                    "Текущая базовая единица «{}» перестанет быть базовой, коэффициенты остальных единиц будут пересчитаны.",
                    units.with_value(|u| unit_label(old, u))
                )
            })
        })
    });
    let preview = Signal::derive(move || {
        let id = unit_id.get();
        let base = is_base.get();
        let text = factor.get();
        set.with_value(|s| prepare(s, &id, base, &text).ok().map(|(_, after)| after))
    });

    let submit = move |_| {
        if saving.get_untracked() {
            return;
        }
        let prepared = set.with_value(|s| {
            prepare(s, &unit_id.get_untracked(), is_base.get_untracked(), &factor.get_untracked())
        });
        let (plan, _) = match prepared {
            Ok(p) => p,
            Err(msg) => {
                error.set(Some(msg));
                return;
            }
        };
        error.set(None);
        saving.set(true);
        spawn_local(async move {
            match api::add_unit(&plan.request).await {
                Ok(()) => {
                    notifications.success("Единица добавлена к материалу");
                    on_done.run(());
                }
                Err(e) => notifications.route(e, error),
            }
            let _ = saving.try_set(false);
        });
    };

    view! {
        <div class="modal-header">
            <h2 class="modal-title">
                {if first_unit { "Базовая единица материала" } else { "Добавить единицу" }}
            </h2>
            <div class="modal-header-actions">
                <Button appearance=ButtonAppearance::Subtle on_click=move |_| on_cancel.run(())>
                    {icon("x")}
                </Button>
            </div>
        </div>

        <div class="modal-body">
            {first_unit.then(|| view! {
                <MessageBar intent=MessageBarIntent::Info>
                    <MessageBarBody>
                        "У материала ещё нет единиц. Первая добавленная единица становится базовой."
                    </MessageBarBody>
                </MessageBar>
            })}
            {move || error.get().map(|e| view! {
                <MessageBar intent=MessageBarIntent::Error>
                    <MessageBarBody>{e}</MessageBarBody>
                </MessageBar>
            })}

            <div class="form__group">
                <label class="form__label">"Единица"</label>
                <ReferenceSelect items=options value=unit_id />
            </div>

            <div class="form__group">
                <Checkbox
                    checked=is_base
                    label="Базовая единица"
                    attr:disabled=fixed_base
                />
            </div>

            {move || caption.get().map(|text| view! {
                <div class="form__group">
                    <label class="form__label">{text}</label>
                    <Input value=factor placeholder="1000" attr:inputmode="decimal" />
                </div>
            })}

            {move || supersede_warning.get().map(|w| view! {
                <MessageBar intent=MessageBarIntent::Warning>
                    <MessageBarBody>{w}</MessageBarBody>
                </MessageBar>
            })}

            {move || preview.get().map(|after| {
                let rows = units.with_value(|u| {
                    after
                        .units()
                        .iter()
                        .map(|mu| (unit_label(mu, u), mu.is_base_unit, mu.factor()))
                        .collect::<Vec<_>>()
                });
                view! {
                    <div class="details-section">
                        <h4 class="details-section__title">"После добавления"</h4>
                        <table class="simple-table">
                            <tbody>
                                {rows.into_iter().map(|(label, base, f)| view! {
                                    <tr>
                                        <td>{label}</td>
                                        <td style="text-align: right; font-variant-numeric: tabular-nums;">
                                            {if base { "базовая".to_string() } else { format_factor(f) }}
                                        </td>
                                    </tr>
                                }).collect_view()}
                            </tbody>
                        </table>
                    </div>
                }
            })}
        </div>

        <div class="modal-footer">
            <Space>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=submit
                    disabled=Signal::derive(move || saving.get())
                >
                    {icon("plus")}
                    {move || if saving.get() { " Сохранение..." } else { " Добавить" }}
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Отмена"
                </Button>
            </Space>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a004_unit_conversion::MaterialUnit;

    fn configured() -> MaterialUnitSet {
        MaterialUnitSet::new(
            "m1",
            vec![
                MaterialUnit::new("m1", "kg", true, 1.0),
                MaterialUnit::new("m1", "g", false, 0.001),
            ],
        )
    }

    #[test]
    fn test_first_unit_needs_no_factor() {
        let empty = MaterialUnitSet::new("m1", Vec::new());
        assert_eq!(factor_caption(&empty, &[], true), None);

        let (plan, after) = prepare(&empty, "kg", true, "").unwrap();
        assert!(plan.request.is_base_unit);
        assert_eq!(plan.request.conversion_factor, 1.0);
        assert_eq!(after.units().len(), 1);
    }

    #[test]
    fn test_first_unit_must_be_base() {
        let empty = MaterialUnitSet::new("m1", Vec::new());
        assert!(prepare(&empty, "kg", false, "").is_err());
    }

    #[test]
    fn test_new_base_supersedes_old_one() {
        let (plan, after) = prepare(&configured(), "t", true, "1000").unwrap();
        assert!(plan.request.replace_base);
        assert_eq!(plan.supersedes.as_deref(), Some("kg"));
        let bases: Vec<_> = after.units().iter().filter(|u| u.is_base_unit).collect();
        assert_eq!(bases.len(), 1);
        assert_eq!(bases[0].unit_id, "t");
    }

    #[test]
    fn test_rejects_missing_unit_and_bad_factor() {
        assert!(prepare(&configured(), "", false, "2").is_err());
        assert!(prepare(&configured(), "box", false, "abc").is_err());
        assert!(prepare(&configured(), "box", false, "0").is_err());
        assert!(prepare(&configured(), "g", false, "2").is_err());
    }
}
