use std::collections::BTreeMap;

/// Map class ids back to class names. When two labels share an id, the last one wins.
pub fn id2label<'a, M>(label2id: M) -> BTreeMap<usize, String>
where
    M: IntoIterator<Item = (&'a String, &'a usize)>,
{
    label2id
        .into_iter()
        .map(|(label, id)| (*id, label.clone()))
        .collect()
}

/// Order class names by their ids, e.g. to turn `label2id` into an `id2label` list
pub fn labels_by_id<'a, M>(label2id: M) -> Vec<String>
where
    M: IntoIterator<Item = (&'a String, &'a usize)>,
{
    id2label(label2id).into_values().collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_id2label() {
        let label2id = BTreeMap::from([("neg".to_string(), 0), ("pos".to_string(), 4)]);

        let id2label = id2label(&label2id);

        assert_eq!(id2label.get(&4).map(String::as_str), Some("pos"));
        assert_eq!(id2label.get(&1), None);
        assert_eq!(id2label.len(), 2);
    }

    #[test]
    fn test_labels_by_id() {
        let label2id = BTreeMap::from([
            ("positive".to_string(), 2),
            ("negative".to_string(), 0),
            ("neutral".to_string(), 1),
        ]);

        assert_eq!(
            labels_by_id(&label2id),
            vec!["negative", "neutral", "positive"]
        );
    }
}
