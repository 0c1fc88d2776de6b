/// A canned prompt bound to a function key.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickAction {
    pub id: &'static str,
    pub label: &'static str,
    pub message: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        id: "help",
        label: "Help",
        message: "Tell me what this chatbot can do",
    },
    QuickAction {
        id: "documents",
        label: "Documents",
        message: "Tell me about the company's important materials and documents",
    },
    QuickAction {
        id: "schedule",
        label: "Schedule",
        message: "Tell me about this month's important schedules and events",
    },
    QuickAction {
        id: "tips",
        label: "Tips",
        message: "Give me some tips for working more efficiently",
    },
];

pub fn quick_action(index: usize) -> Option<&'static QuickAction> {
    QUICK_ACTIONS.get(index)
}
