//! crediflow-model — The pre-trained loan classifier.
//!
//! The artifact is a JSON document exported by the training pipeline,
//! carrying the training feature schema, an optional standard scaler and
//! the logistic-regression parameters. It is deserialized once at process
//! start into a [`LoanClassifier`], which is then a pure prediction
//! service for the rest of the process lifetime.
//!
//! # Example
//!
//! ```rust,no_run
//! use crediflow_common::{Education, Family, LoanApplication};
//! use crediflow_model::LoanClassifier;
//!
//! fn main() -> anyhow::Result<()> {
//!     let clf = LoanClassifier::load("Bank_Personal_Loan.json")?;
//!     let record = LoanApplication {
//!         id: 1,
//!         age: 30,
//!         experience: 5,
//!         income: 120,
//!         zip_code: 90210,
//!         family: Family::Two,
//!         cc_avg: 1.4,
//!         education: Education::Graduate,
//!         mortgage: 0,
//!         securities_account: false,
//!         cd_account: true,
//!         online: true,
//!         credit_card: false,
//!     };
//!     let prediction = clf.predict(&record);
//!     println!("label {} (p = {:.3})", prediction.label.as_u8(), prediction.probability);
//!     Ok(())
//! }
//! ```

pub mod artifact;
pub mod classifier;

pub use artifact::ModelArtifact;
pub use classifier::{Label, LoanClassifier, Prediction};
