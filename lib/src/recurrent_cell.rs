use rand::Rng;
use rand::distributions::{Distribution, Uniform};

const INITIAL_WEIGHT_LIMIT : f64 = 0.5;

#[derive(Debug, PartialEq, Clone)]
pub struct CellState {
    pub hidden : Vec<f64>,
    pub memory : Vec<f64>
}

impl CellState {
    pub fn zeros(hidden_size : usize) -> CellState {
        CellState { hidden : vec!(0.0; hidden_size), memory : vec!(0.0; hidden_size) }
    }
}

/// Weights of one gate: a row per output unit over the concatenated `[input, hidden]` vector.
#[derive(Debug, PartialEq, Clone)]
pub struct GateParameters {
    pub weights : Vec<Vec<f64>>,
    pub bias : Vec<f64>
}

impl GateParameters {
    fn random<R : Rng + ?Sized>(rows : usize, cols : usize, rng : &mut R) -> GateParameters {
        let distribution = Uniform::new_inclusive(-INITIAL_WEIGHT_LIMIT, INITIAL_WEIGHT_LIMIT);
        let weights = (0..rows)
            .map(|_| (0..cols).map(|_| distribution.sample(&mut *rng)).collect())
            .collect();
        let bias = (0..rows).map(|_| distribution.sample(&mut *rng)).collect();

        GateParameters { weights, bias }
    }

    fn activate(&self, concat : &[f64], activation : fn(f64) -> f64) -> Vec<f64> {
        self.weights.iter().zip(&self.bias)
            .map(|(row, b)| activation(row.iter().zip(concat).map(|(w, x)| w * x).sum::<f64>() + b))
            .collect()
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct CellParameters {
    pub forget : GateParameters,
    pub input : GateParameters,
    pub candidate : GateParameters,
    pub output : GateParameters
}

impl CellParameters {
    pub fn random<R : Rng + ?Sized>(input_size : usize, hidden_size : usize, rng : &mut R) -> CellParameters {
        let cols = input_size + hidden_size;
        CellParameters {
            forget : GateParameters::random(hidden_size, cols, rng),
            input : GateParameters::random(hidden_size, cols, rng),
            candidate : GateParameters::random(hidden_size, cols, rng),
            output : GateParameters::random(hidden_size, cols, rng)
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
pub struct GateActivations {
    pub forget : Vec<f64>,
    pub input : Vec<f64>,
    pub candidate : Vec<f64>,
    pub output : Vec<f64>
}

/// A single gated memory unit. Forward passes never touch the parameters.
#[derive(Debug, Clone)]
pub struct RecurrentCell {
    parameters : CellParameters,
    hidden_size : usize
}

impl RecurrentCell {
    pub fn new<R : Rng + ?Sized>(input_size : usize, hidden_size : usize, rng : &mut R) -> RecurrentCell {
        RecurrentCell::with_parameters(CellParameters::random(input_size, hidden_size, rng))
    }

    pub fn with_parameters(parameters : CellParameters) -> RecurrentCell {
        let hidden_size = parameters.forget.bias.len();
        RecurrentCell { parameters, hidden_size }
    }

    pub fn gate_activations(&self, input : &[f64], state : &CellState) -> GateActivations {
        let concat : Vec<f64> = input.iter().chain(&state.hidden).copied().collect();

        GateActivations {
            forget : self.parameters.forget.activate(&concat, sigmoid),
            input : self.parameters.input.activate(&concat, sigmoid),
            candidate : self.parameters.candidate.activate(&concat, f64::tanh),
            output : self.parameters.output.activate(&concat, sigmoid)
        }
    }

    pub fn forward(&self, input : &[f64], state : &CellState) -> CellState {
        let gates = self.gate_activations(input, state);

        let memory : Vec<f64> = (0..self.hidden_size)
            .map(|i| state.memory[i] * gates.forget[i] + gates.input[i] * gates.candidate[i])
            .collect();
        let hidden = (0..self.hidden_size)
            .map(|i| gates.output[i] * memory[i].tanh())
            .collect();

        CellState { hidden, memory }
    }

    /// Folds scalar inputs through the cell, starting from an all-zero state.
    pub fn run_sequence(&self, inputs : &[f64]) -> CellState {
        inputs.iter().fold(CellState::zeros(self.hidden_size), |state, x| self.forward(&[*x], &state))
    }
}

fn sigmoid(x : f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}
