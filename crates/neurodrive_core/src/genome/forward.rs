use super::*;
use ndarray::Array1;

/// Logistic function used for the throttle channel.
#[must_use]
pub fn sigmoid(s: f32) -> f32 {
    1.0 / (1.0 + (-s).exp())
}

pub fn infer(genome: &Genome, sensors: [f32; SENSOR_INPUTS]) -> (f32, f32) {
    let mut activations = Activations::default();
    infer_internal(genome, sensors, &mut activations)
}

/// Runs the network on one sensor triple.
///
/// Layer `i` of the `biases.len() - 1` hidden layers reads weight matrix `i`;
/// the output layer reads the last matrix. The steering output is squashed
/// by `tanh` twice: once as the output layer activation and once more on
/// return.
///
/// `genome` must come from a validated constructor; tensors that do not
/// match their own topology panic.
pub fn infer_internal(
    genome: &Genome,
    sensors: [f32; SENSOR_INPUTS],
    activations: &mut Activations,
) -> (f32, f32) {
    debug_assert!(
        genome.biases.len() >= 2 && genome.topology().matches(genome),
        "genome tensors do not match their topology"
    );
    let layers = genome.biases.len() - 1;

    activations.input = Array1::from_vec(sensors.to_vec()).mapv(f32::tanh);
    activations.hidden.resize(layers, Array1::zeros(0));

    for i in 0..layers {
        let z = if i == 0 {
            activations.input.dot(&genome.weights[0])
        } else {
            activations.hidden[i - 1].dot(&genome.weights[i])
        };
        activations.hidden[i] = (z + genome.biases[i]).mapv(f32::tanh);
    }

    let last_weights = &genome.weights[genome.weights.len() - 1];
    let z = activations.hidden[layers - 1].dot(last_weights);
    activations.output = (z + genome.biases[layers]).mapv(f32::tanh);

    (sigmoid(activations.output[0]), activations.output[1].tanh())
}
