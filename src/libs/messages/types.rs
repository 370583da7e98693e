#[derive(Debug, Clone)]
pub enum Message {
    // === SCHEDULER MESSAGES ===
    SchedulerStarted(usize), // alert count
    SchedulerShuttingDown,
    ReceivedCtrlC,
    ReceivedSigterm,
    ReceivedSigint,
    SignalHandlingNotSupported,
    TaskPanicked(String),  // error
    DayRollover(String),   // logical day
    NewDayBody(String),    // formatted day
    SkippingNotActive(String), // task name

    // === ALERT MESSAGES ===
    AlertRefreshFailed(String, String), // label, error
    CheckinFailed(String),              // error
    NewDayCheckFailed(String),          // error
    AfkStatusFailed(String),            // error

    // === NOTIFIER MESSAGES ===
    NotificationSent(String, String), // title, body
    NotifySendFailed(String),         // error

    // === CATEGORY MESSAGES ===
    CategoriesLoaded(String, usize), // source path, count
    CategoriesDefault(usize),        // count
    CategoriesInvalidNode(String),   // offending path
    CategoriesReadFailed(String, String),  // path, error
    CategoriesParseFailed(String, String), // path, error

    // === CHECK-IN MESSAGES ===
    CheckinSent,
}
