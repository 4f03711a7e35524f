//! Работа с BPMN-схемой без её разбора: отрисовку выполняет bpmn-js

/// CSS маркер текущего шага на схеме
pub const HIGHLIGHT_MARKER: &str = "highlight-current";

/// Контейнеры и разметка диаграммы: у них есть id, но маркер на них не ставится
const UNMARKABLE_TAGS: &[&str] = &[
    "definitions",
    "process",
    "collaboration",
    "BPMNDiagram",
    "BPMNPlane",
    "BPMNShape",
    "BPMNEdge",
    "BPMNLabel",
];

/// Локальное имя тега, внутри которого стоит позиция `pos`
fn enclosing_tag(bpmn_xml: &str, pos: usize) -> Option<&str> {
    let open = bpmn_xml[..pos].rfind('<')?;
    let name = bpmn_xml[open + 1..pos].split_whitespace().next()?;
    Some(name.rsplit(':').next().unwrap_or(name))
}

/// Есть ли в схеме отрисовываемый элемент с указанным id
pub fn contains_element(bpmn_xml: &str, element_id: &str) -> bool {
    if element_id.trim().is_empty() {
        return false;
    }
    let double = format!("id=\"{}\"", element_id);
    let single = format!("id='{}'", element_id);
    bpmn_xml.match_indices(&double).chain(bpmn_xml.match_indices(&single)).any(|(pos, _)| {
        // только атрибут id целиком, не хвост другого атрибута
        let whole_attr = pos == 0 || bpmn_xml[..pos].ends_with(char::is_whitespace);
        whole_attr
            && enclosing_tag(bpmn_xml, pos).is_some_and(|tag| !UNMARKABLE_TAGS.contains(&tag))
    })
}

/// Элемент схемы, который нужно подсветить, если он там есть
pub fn highlight_target<'a>(bpmn_xml: &str, step_id: &'a str) -> Option<&'a str> {
    contains_element(bpmn_xml, step_id).then_some(step_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    const XML: &str = r#"<bpmn:process id="Process_1">
  <bpmn:startEvent id="Start_1"/>
  <bpmn:userTask id="Task_Approve" name="Согласование"/>
  <bpmn:sequenceFlow id="Flow_1" sourceRef="Start_1" targetRef="Task_Approve"/>
</bpmn:process>
<ext:meta stepid="Task_Ghost"/>"#;

    #[test]
    fn test_finds_existing_element() {
        assert!(contains_element(XML, "Task_Approve"));
        assert_eq!(highlight_target(XML, "Start_1"), Some("Start_1"));
    }

    #[test]
    fn test_containers_and_diagram_shapes_are_not_marked() {
        let xml = r#"<bpmn:definitions id="Definitions_1">
<bpmn:process id="Process_1"><bpmn:userTask id="Task_Approve"/></bpmn:process>
<bpmndi:BPMNDiagram id="BPMNDiagram_1">
  <bpmndi:BPMNPlane id="BPMNPlane_1" bpmnElement="Process_1">
    <bpmndi:BPMNShape id="Task_Approve_di" bpmnElement="Task_Approve"/>
  </bpmndi:BPMNPlane>
</bpmndi:BPMNDiagram>
</bpmn:definitions>"#;
        assert_eq!(highlight_target(xml, "Task_Approve"), Some("Task_Approve"));
        for id in ["Definitions_1", "Process_1", "BPMNDiagram_1", "BPMNPlane_1", "Task_Approve_di"] {
            assert_eq!(highlight_target(xml, id), None, "{}", id);
        }
    }

    #[test]
    fn test_unknown_or_partial_ids_are_not_found() {
        assert!(!contains_element(XML, "Task_Missing"));
        assert!(!contains_element(XML, "Task"));
        assert!(!contains_element(XML, "Task_Ghost"));
        assert!(!contains_element(XML, ""));
        assert_eq!(highlight_target(XML, "Task_Missing"), None);
    }
}
