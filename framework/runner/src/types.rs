/// Recommended error type for your scenario `main` function and any shared behaviour code that you
/// write for scenarios. This type is compatible with [crate::definition::HookResult] and
/// [crate::definition::ScenarioBehaviour] so you can use `?` to propagate errors.
pub type FrameTunnelResult<T> = anyhow::Result<T>;
