/// The example invocations shown on the gh-templates landing page, in display order.
pub(crate) const DEFAULT_COMMANDS: &[&str] = &[
    // add
    "gh-templates issue add bug",
    "gh-templates license add mit",
    "gh-templates gitignore add node",
    "gh-templates pr add default",
    // list
    "gh-templates issue list",
    "gh-templates license list",
    "gh-templates license list --popular",
    "gh-templates license list --non-software",
    "gh-templates license list --fsf-libre",
    "gh-templates license list --osi-approved",
    "gh-templates license list --search apa*",
    "gh-templates gitignore list",
    "gh-templates gitignore list --popular",
    "gh-templates gitignore list --global",
    "gh-templates gitignore list --community",
    "gh-templates pr list",
    // preview
    "gh-templates issue preview bug",
    "gh-templates license preview mit",
    "gh-templates gitignore preview node",
    "gh-templates pr preview default",
];

/// An ordered, immutable list of commands iterated circularly.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct CommandList {
    commands: Vec<String>,
}

impl CommandList {
    pub(crate) fn new<I, S>(commands: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { commands: commands.into_iter().map(Into::into).collect() }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub(crate) fn get(&self, index: usize) -> Option<&str> {
        self.commands.get(index).map(String::as_str)
    }

    /// The index that follows `index`, wrapping at the end of the list.
    pub(crate) fn next_index(&self, index: usize) -> usize {
        if self.commands.is_empty() { 0 } else { (index + 1) % self.commands.len() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 1)]
    #[case(1, 2)]
    #[case(2, 0)]
    fn next_index_wraps(#[case] index: usize, #[case] expected: usize) {
        let list = CommandList::new(["a", "b", "c"]);
        assert_eq!(list.next_index(index), expected);
    }

    #[test]
    fn empty_list() {
        let list = CommandList::new(Vec::<String>::new());
        assert!(list.is_empty());
        assert_eq!(list.get(0), None);
        assert_eq!(list.next_index(0), 0);
    }

    #[test]
    fn defaults_are_gh_templates_invocations() {
        assert_eq!(DEFAULT_COMMANDS.len(), 20);
        assert!(DEFAULT_COMMANDS.iter().all(|c| c.starts_with("gh-templates ")));
    }
}
