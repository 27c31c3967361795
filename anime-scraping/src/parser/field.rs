use crate::tree::DocNode;

#[derive(Debug, thiserror::Error)]
pub enum LocateError {
    #[error("Label {0:?} was not found")]
    LabelNotFound(String),
    #[error("No value was found next to label {0:?}")]
    ValueNotFound(String),
}

/// Finds the value written right after `label`, ignoring blank text in between.
pub fn find_sidebar_info_by_label<'a, N: DocNode<'a>>(
    label: &str,
    container: N,
) -> Result<String, LocateError> {
    let value = siblings_after_label(label, container)?
        .find(|node| node.is_element() || node.text_node().is_some_and(|t| !t.trim().is_empty()))
        .ok_or_else(|| LocateError::ValueNotFound(label.to_owned()))?;
    Ok(value.text_content().trim().to_owned())
}

/// Statistics are laid out as label, one unrelated node, then the value.
pub fn find_sidebar_statistics_by_label<'a, N: DocNode<'a>>(
    label: &str,
    container: N,
) -> Result<Option<String>, LocateError> {
    let mut siblings = siblings_after_label(label, container)?;
    siblings.next();
    Ok(siblings
        .next()
        .map(|node| node.text_content().trim().to_owned()))
}

fn siblings_after_label<'a, N: DocNode<'a>>(
    label: &str,
    container: N,
) -> Result<N::Children, LocateError> {
    find_label(label, container).ok_or_else(|| LocateError::LabelNotFound(label.to_owned()))
}

// Depth-first so that the first label in document order wins.
fn find_label<'a, N: DocNode<'a>>(label: &str, parent: N) -> Option<N::Children> {
    let mut children = parent.children();
    while let Some(child) = children.next() {
        if child.is_named("span") && child.text_content() == label {
            return Some(children);
        }
        if let Some(siblings) = find_label(label, child) {
            return Some(siblings);
        }
    }
    None
}
