//! Click policy for in-page anchors and the protected link.

/// What a click handler should do after suppressing default navigation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LinkAction<'a> {
    /// Smooth-scroll the element with this id into view.
    ScrollTo(&'a str),
    /// Show the blocking notice.
    Notify(&'a str),
    /// Nothing beyond suppressing navigation.
    Ignore,
}

/// Shows a blocking notice to the user.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Element id targeted by an in-page `href`, if any. `"#"` alone has none.
#[inline]
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

pub fn anchor_action(href: &str) -> LinkAction<'_> {
    match anchor_target(href) {
        Some(id) => LinkAction::ScrollTo(id),
        None => LinkAction::Ignore,
    }
}

/// Guard for a link that must never navigate.
#[derive(Clone, Debug)]
pub struct ProtectedLink {
    notice: String,
    blocked: u64,
}

impl ProtectedLink {
    pub fn new(notice: impl Into<String>) -> Self {
        Self {
            notice: notice.into(),
            blocked: 0,
        }
    }

    pub fn blocked_count(&self) -> u64 {
        self.blocked
    }

    /// One activation: always blocked, notice shown exactly once.
    pub fn on_click<N: Notifier + ?Sized>(&mut self, notifier: &mut N) -> LinkAction<'_> {
        self.blocked += 1;
        notifier.notify(&self.notice);
        LinkAction::Notify(&self.notice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anchor_targets() {
        assert_eq!(anchor_target("#about"), Some("about"));
        assert_eq!(anchor_target("#"), None);
        assert_eq!(anchor_target("/page#x"), None);
        assert_eq!(anchor_action("#projects"), LinkAction::ScrollTo("projects"));
        assert_eq!(anchor_action("#"), LinkAction::Ignore);
    }

    struct Count(usize);

    impl Notifier for Count {
        fn notify(&mut self, _message: &str) {
            self.0 += 1;
        }
    }

    #[test]
    fn protected_anchor_runs_both_policies() {
        // `<a id="zaenalos-vm" href="#">`: the anchor policy does nothing,
        // the guard still shows the notice.
        let href = "#";
        let mut notices = Count(0);
        let mut link = ProtectedLink::new("private");
        assert_eq!(anchor_action(href), LinkAction::Ignore);
        assert_eq!(link.on_click(&mut notices), LinkAction::Notify("private"));
        assert_eq!(notices.0, 1);
        assert_eq!(link.blocked_count(), 1);
    }
}
