use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SENSOR_INPUTS: usize = 3;
pub const CONTROL_OUTPUTS: usize = OUTPUT_LABELS.len();

pub const OUTPUT_LABELS: [&str; 2] = ["Throttle", "Steering"];

/// Fixed network shape shared by a whole population.
///
/// `hidden_layers` is the configured layer count. The network actually runs
/// `hidden_layers + 1` hidden layers, and the weight list carries one
/// `[H, H]` matrix per hidden layer between the input and output matrices.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Topology {
    pub hidden_layers: usize,
    pub hidden_neurons: usize,
}

impl Topology {
    /// Number of hidden layers evaluated by the forward pass.
    #[must_use]
    pub fn network_layers(&self) -> usize {
        self.hidden_layers + 1
    }

    #[must_use]
    pub fn weight_count(&self) -> usize {
        self.hidden_layers + 3
    }

    #[must_use]
    pub fn bias_count(&self) -> usize {
        self.hidden_layers + 2
    }

    /// `(rows, cols)` of every weight matrix, in order.
    #[must_use]
    pub fn weight_shapes(&self) -> Vec<(usize, usize)> {
        let h = self.hidden_neurons;
        let mut shapes = Vec::with_capacity(self.weight_count());
        shapes.push((SENSOR_INPUTS, h));
        for _ in 0..self.network_layers() {
            shapes.push((h, h));
        }
        shapes.push((h, CONTROL_OUTPUTS));
        shapes
    }

    /// Returns `true` when the genome's tensors have exactly this shape.
    #[must_use]
    pub fn matches(&self, genome: &Genome) -> bool {
        genome.biases.len() == self.bias_count()
            && genome.weights.len() == self.weight_count()
            && genome
                .weights
                .iter()
                .zip(self.weight_shapes())
                .all(|(w, shape)| w.dim() == shape)
    }
}

/// One candidate controller: the network's tensors plus its fitness.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Genome {
    /// Handle used by the environment when reporting fitness.
    pub id: Uuid,
    pub weights: Vec<Array2<f32>>,
    /// One scalar per hidden layer plus one for the output layer.
    pub biases: Vec<f32>,
    pub fitness: f32,
}

impl Genome {
    /// Topology implied by the tensor shapes.
    #[must_use]
    pub fn topology(&self) -> Topology {
        Topology {
            hidden_layers: self.biases.len().saturating_sub(2),
            hidden_neurons: self.weights.first().map_or(0, |w| w.ncols()),
        }
    }

    /// Serialize genome to a JSON string.
    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserialize genome from a JSON string.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let genome = serde_json::from_str(json)?;
        Ok(genome)
    }
}

/// Scratch buffers reused across forward passes of the same topology.
#[derive(Debug, Clone, Default)]
pub struct Activations {
    pub input: Array1<f32>,
    pub hidden: Vec<Array1<f32>>,
    pub output: Array1<f32>,
}

impl Activations {
    #[must_use]
    pub fn new(topology: &Topology) -> Self {
        let mut activations = Self::default();
        activations.prepare(topology);
        activations
    }

    /// Prepare activation buffers for the given topology.
    pub fn prepare(&mut self, topology: &Topology) {
        self.input = Array1::zeros(SENSOR_INPUTS);
        self.hidden.clear();
        self.hidden
            .resize(topology.network_layers(), Array1::zeros(topology.hidden_neurons));
        self.output = Array1::zeros(CONTROL_OUTPUTS);
    }
}
