use nalgebra::{DMatrix, DVector};

const ARMIJO_C1: f64 = 1e-4;
const MIN_LINE_SEARCH_STEP: f64 = 1e-12;
const CURVATURE_EPSILON: f64 = 1e-12;

/// Stopping criteria and numerical settings for [`minimize`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinimizerOptions {
    /// Upper bound on quasi-Newton iterations.
    pub max_iterations: usize,
    /// Converged once the largest gradient component falls to this value.
    pub gradient_tolerance: f64,
    /// Converged once the relative decrease of the objective between two
    /// iterations falls to this value.
    pub function_tolerance: f64,
    /// Step used for central finite-difference gradients.
    pub finite_difference_step: f64,
}

impl Default for MinimizerOptions {
    fn default() -> Self {
        Self {
            max_iterations: 15_000,
            gradient_tolerance: 1e-5,
            function_tolerance: 2.220446049250313e-9,
            finite_difference_step: 1e-8,
        }
    }
}

impl MinimizerOptions {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.max_iterations == 0 {
            return Err("max-iterations must be at least 1");
        }
        if !(self.gradient_tolerance.is_finite() && self.gradient_tolerance > 0.0) {
            return Err("gradient-tolerance must be positive and finite");
        }
        if !(self.function_tolerance.is_finite() && self.function_tolerance >= 0.0) {
            return Err("function-tolerance must be non-negative and finite");
        }
        if !(self.finite_difference_step.is_finite() && self.finite_difference_step > 0.0) {
            return Err("finite-difference-step must be positive and finite");
        }
        Ok(())
    }
}

/// Why [`minimize`] stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    GradientTolerance,
    FunctionTolerance,
    /// No step along the search direction decreased the objective.
    LineSearchFailed,
    MaxIterations,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Minimum {
    pub x: DVector<f64>,
    pub value: f64,
    pub iterations: usize,
    pub termination: Termination,
}

impl Minimum {
    pub fn converged(&self) -> bool {
        matches!(
            self.termination,
            Termination::GradientTolerance | Termination::FunctionTolerance
        )
    }
}

/// Central finite-difference gradient of `objective` at `x`.
pub fn numerical_gradient<F>(objective: &F, x: &DVector<f64>, step: f64) -> DVector<f64>
where
    F: Fn(&DVector<f64>) -> f64,
{
    let mut grad = DVector::zeros(x.len());
    let mut probe = x.clone();
    for i in 0..x.len() {
        let xi = x[i];
        probe[i] = xi + step;
        let forward = objective(&probe);
        probe[i] = xi - step;
        let backward = objective(&probe);
        probe[i] = xi;
        grad[i] = (forward - backward) / (2.0 * step);
    }
    grad
}

/// Unconstrained local minimization by BFGS with finite-difference gradients.
///
/// The inverse Hessian starts as the identity and is updated only when the
/// curvature condition holds. Steps are chosen by Armijo backtracking; when
/// the quasi-Newton direction is not a descent direction the method restarts
/// from steepest descent. The search is fully deterministic: the same
/// objective and seed always produce the same result.
///
/// # Arguments
///
/// * `objective` - The function to minimize.
/// * `x0` - The seed point.
/// * `options` - Stopping criteria.
pub fn minimize<F>(objective: F, x0: DVector<f64>, options: &MinimizerOptions) -> Minimum
where
    F: Fn(&DVector<f64>) -> f64,
{
    let n = x0.len();
    let mut x = x0;
    let mut value = objective(&x);
    let mut grad = numerical_gradient(&objective, &x, options.finite_difference_step);
    let mut inv_hessian = DMatrix::<f64>::identity(n, n);

    let mut iterations = 0;
    let termination = loop {
        if grad.amax() <= options.gradient_tolerance {
            break Termination::GradientTolerance;
        }
        if iterations >= options.max_iterations {
            break Termination::MaxIterations;
        }

        let mut direction = -(&inv_hessian * &grad);
        let mut slope = direction.dot(&grad);
        if slope >= 0.0 {
            inv_hessian = DMatrix::identity(n, n);
            direction = -grad.clone();
            slope = direction.dot(&grad);
        }

        let Some((x_new, value_new)) = backtrack(&objective, &x, value, &direction, slope) else {
            break Termination::LineSearchFailed;
        };
        let grad_new = numerical_gradient(&objective, &x_new, options.finite_difference_step);

        let s = &x_new - &x;
        let y = &grad_new - &grad;
        let sy = s.dot(&y);
        if sy > CURVATURE_EPSILON {
            let rho = 1.0 / sy;
            let identity = DMatrix::<f64>::identity(n, n);
            let left = &identity - (&s * y.transpose()) * rho;
            let right = &identity - (&y * s.transpose()) * rho;
            inv_hessian = left * inv_hessian * right + (&s * s.transpose()) * rho;
        }

        let decrease = value - value_new;
        let scale = value.abs().max(value_new.abs()).max(1.0);

        x = x_new;
        value = value_new;
        grad = grad_new;
        iterations += 1;

        if decrease <= options.function_tolerance * scale {
            break Termination::FunctionTolerance;
        }
    };

    Minimum {
        x,
        value,
        iterations,
        termination,
    }
}

fn backtrack<F>(
    objective: &F,
    x: &DVector<f64>,
    value: f64,
    direction: &DVector<f64>,
    slope: f64,
) -> Option<(DVector<f64>, f64)>
where
    F: Fn(&DVector<f64>) -> f64,
{
    let mut alpha = 1.0;
    while alpha >= MIN_LINE_SEARCH_STEP {
        let candidate = x + direction * alpha;
        let candidate_value = objective(&candidate);
        if candidate_value <= value + ARMIJO_C1 * alpha * slope {
            return Some((candidate, candidate_value));
        }
        alpha *= 0.5;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rosenbrock(x: &DVector<f64>) -> f64 {
        (1.0 - x[0]).powi(2) + 100.0 * (x[1] - x[0] * x[0]).powi(2)
    }

    #[test]
    fn default_options_are_valid() {
        assert!(MinimizerOptions::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_bad_values() {
        let base = MinimizerOptions::default();
        assert!(MinimizerOptions { max_iterations: 0, ..base }.validate().is_err());
        assert!(MinimizerOptions { gradient_tolerance: 0.0, ..base }.validate().is_err());
        assert!(MinimizerOptions { function_tolerance: f64::NAN, ..base }.validate().is_err());
        assert!(MinimizerOptions { finite_difference_step: -1e-8, ..base }.validate().is_err());
    }

    #[test]
    fn numerical_gradient_matches_analytic_gradient() {
        let f = |x: &DVector<f64>| x[0] * x[0] + 3.0 * x[0] * x[1] + x[1].sin();
        let x = DVector::from_vec(vec![0.7, -1.2]);
        let grad = numerical_gradient(&f, &x, 1e-6);
        assert!((grad[0] - (2.0 * 0.7 + 3.0 * -1.2)).abs() < 1e-6);
        assert!((grad[1] - (3.0 * 0.7 + (-1.2f64).cos())).abs() < 1e-6);
    }

    #[test]
    fn minimizes_one_dimensional_quadratic() {
        let result = minimize(
            |x: &DVector<f64>| (x[0] - 3.0).powi(2) + 1.0,
            DVector::from_element(1, -4.0),
            &MinimizerOptions::default(),
        );
        assert!(result.converged());
        assert!((result.x[0] - 3.0).abs() < 1e-5);
        assert!((result.value - 1.0).abs() < 1e-9);
    }

    #[test]
    fn minimizes_rosenbrock_from_standard_seed() {
        let result = minimize(
            rosenbrock,
            DVector::from_vec(vec![-1.2, 1.0]),
            &MinimizerOptions::default(),
        );
        assert!(result.value < 1e-4, "f = {}", result.value);
        assert!((result.x[0] - 1.0).abs() < 2e-2, "x = {}", result.x);
        assert!((result.x[1] - 1.0).abs() < 4e-2, "x = {}", result.x);
    }

    #[test]
    fn stationary_seed_terminates_immediately() {
        let result = minimize(
            |x: &DVector<f64>| x.norm_squared(),
            DVector::zeros(3),
            &MinimizerOptions::default(),
        );
        assert_eq!(result.iterations, 0);
        assert_eq!(result.termination, Termination::GradientTolerance);
        assert_eq!(result.x, DVector::zeros(3));
    }

    #[test]
    fn respects_iteration_budget() {
        let options = MinimizerOptions {
            max_iterations: 1,
            ..Default::default()
        };
        let result = minimize(rosenbrock, DVector::from_vec(vec![-1.2, 1.0]), &options);
        assert_eq!(result.iterations, 1);
        assert_eq!(result.termination, Termination::MaxIterations);
        assert!(!result.converged());
    }

    #[test]
    fn repeated_runs_are_bit_identical() {
        let f = |x: &DVector<f64>| (x[0] - 0.3).powi(4) + (x[1] + 2.0).powi(2) + x[0] * x[1];
        let seed = DVector::from_vec(vec![1.0, 1.0]);
        let a = minimize(f, seed.clone(), &MinimizerOptions::default());
        let b = minimize(f, seed, &MinimizerOptions::default());
        assert_eq!(a, b);
    }
}
