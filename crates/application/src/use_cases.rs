use photo_flow_domain::AdjustmentKind;

#[derive(Debug, Clone, Default)]
pub struct AdvanceFeatureCommand;

#[derive(Debug, Clone, Default)]
pub struct ResetSessionCommand;

#[derive(Debug, Clone, Default)]
pub struct RefreshCommand;

#[derive(Debug, Clone)]
pub struct SourceUploadedCommand {
    pub source_url: String,
}

#[derive(Debug, Clone, Default)]
pub struct RemoveBackgroundCommand;

#[derive(Debug, Clone, Default)]
pub struct ChangeBackgroundCommand {
    /// Falls back to the first configured background when absent.
    pub background_url: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct AdjustCommand {
    pub kind: AdjustmentKind,
    pub value: f32,
}

#[derive(Debug, Clone, Default)]
pub struct CommitAdjustmentsCommand;

#[derive(Debug, Clone, Default)]
pub struct SessionSnapshotQuery;
