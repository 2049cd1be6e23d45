/// Use cases module containing application business logic orchestration
mod scan_licenses;

pub use scan_licenses::ScanLicensesUseCase;
