//! Reference modules (§3 "Open bucket `data`"): small hook bundles that each
//! own one slice of `VNodeData::extra` and talk to the live host node
//! directly, the way a real attrs/class/style/eventlisteners module stack
//! does. None of these are part of the reconciliation core; they exist to
//! exercise the hook contract end-to-end and as a starting point for a real
//! application's own modules.

pub mod attrs;
pub mod class;
pub mod dataset;
pub mod eventlisteners;
pub mod props;
pub mod style;
