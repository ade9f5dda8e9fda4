use crate::graph::GraphNode;
use crate::synth::voice::VoiceId;

/// Control → audio messages.
///
/// Everything heavy - validation, parameter clamping, graph construction,
/// allocation - happens on the control path before the push. The audio side
/// only installs what it pops, so draining the queue never risks the block
/// deadline.
pub enum EngineMessage {
    Spawn {
        id: VoiceId,
        graph: Box<dyn GraphNode>,
        /// Scheduled duration plus safety margin, in samples. The audio side
        /// stamps the expiry against its own frame clock at install time.
        lifetime_samples: u64,
    },
}
