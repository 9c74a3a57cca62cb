/// Use cases module containing application business logic orchestration
mod generate_diagram;

pub use generate_diagram::GenerateDiagramUseCase;
