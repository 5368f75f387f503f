pub mod models;
pub mod services;

pub use models::{
    ConfirmAppointmentRequest, ConfirmAppointmentResponse, CoordinatorState, GatewayError,
    IntakeForm, IntakePolicy, PaymentConfirmation, PaymentIntent,
};
pub use services::checkout::CheckoutService;
pub use services::coordinator::{
    CloseOutcome, CoordinatorError, IntakeOutcome, PaymentCoordinator, SubmitOutcome,
    SUCCESS_CLOSE_DELAY,
};
pub use services::gateway::PaymentGateway;
