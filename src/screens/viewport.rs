/// Terminal width guard, evaluated on every redraw

/// Shown instead of the layout while the terminal is too narrow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidthWarning {
    pub required: u16,
    pub actual: u16,
}

impl WidthWarning {
    pub fn message(&self) -> String {
        format!(
            "Terminal width {} too small to display full UI (need >= {} columns). Resize terminal or press OK.",
            self.actual, self.required
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewportChange {
    WarningShown,
    LayoutRestored,
}

/// `dialog_shown` debounces the warning: it is raised once per narrow
/// period and cleared once the width recovers, however often the terminal
/// is resized in between.
#[derive(Debug, Clone)]
pub struct ViewportGuard {
    min_width: u16,
    dialog_shown: bool,
    warning: Option<WidthWarning>,
}

impl ViewportGuard {
    pub fn new(min_width: u16) -> Self {
        Self {
            min_width,
            dialog_shown: false,
            warning: None,
        }
    }

    pub fn observe(&mut self, width: u16) -> Option<ViewportChange> {
        if width < self.min_width {
            if !self.dialog_shown {
                self.dialog_shown = true;
                self.warning = Some(WidthWarning {
                    required: self.min_width,
                    actual: width,
                });
                return Some(ViewportChange::WarningShown);
            }
            if let Some(warning) = self.warning.as_mut() {
                warning.actual = width;
            }
            return None;
        }

        if self.dialog_shown {
            self.dialog_shown = false;
            self.warning = None;
            return Some(ViewportChange::LayoutRestored);
        }
        None
    }

    /// User pressed OK: hide the warning until the next narrow period
    pub fn acknowledge(&mut self) -> bool {
        self.warning.take().is_some()
    }

    /// Warning to draw in place of the layout, if any
    pub fn warning(&self) -> Option<&WidthWarning> {
        self.warning.as_ref()
    }

    pub fn is_dialog_shown(&self) -> bool {
        self.dialog_shown
    }
}
