use clap::{Parser, Subcommand};
use otoyai::catalog::CatalogSnapshot;
use otoyai::prelude::*;
use otoyai::validation::connection_types;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Inspect endpoint catalogs and run saved node graphs
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print inferred schemas for a catalog
    Schema {
        /// Catalog JSON or `.bin` snapshot. Fetched from the API when omitted.
        #[arg(short, long)]
        catalog: Option<String>,
        /// Only print the schema of this endpoint
        #[arg(short, long)]
        endpoint: Option<String>,
    },
    /// Fetch the catalog from the API and save an offline snapshot
    Snapshot {
        #[arg(short, long, default_value = "catalog.bin")]
        output: String,
    },
    /// Load a project and check its nodes and connections
    Validate { project: String },
    /// Print the payload a node would send, without executing it
    Package {
        project: String,
        #[arg(short, long)]
        node: String,
    },
    /// Execute a node and write the outcome back into the project
    Execute {
        project: String,
        #[arg(short, long)]
        node: String,
        /// Save the updated project to this path instead of overwriting
        #[arg(short, long)]
        output: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "otoyai=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Schema { catalog, endpoint } => print_schemas(catalog, endpoint).await,
        Command::Snapshot { output } => save_snapshot(&output).await,
        Command::Validate { project } => validate_project(&project).await,
        Command::Package { project, node } => package_node(&project, &node).await,
        Command::Execute {
            project,
            node,
            output,
        } => run_node(&project, &node, output).await,
    }
}

fn api_client() -> ApiClient {
    let config = ClientConfig::from_env()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid configuration: {}", e)));
    ApiClient::new(config)
        .unwrap_or_else(|e| exit_with_error(&format!("Could not build HTTP client: {}", e)))
}

async fn load_catalog(path: Option<String>) -> EndpointCatalog {
    match path {
        Some(path) if path.ends_with(".bin") => CatalogSnapshot::from_file(&path)
            .map(CatalogSnapshot::into_catalog)
            .unwrap_or_else(|e| exit_with_error(&e.to_string())),
        Some(path) => {
            let json = tokio::fs::read_to_string(&path).await.unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to read catalog file '{}': {}", path, e))
            });
            EndpointCatalog::from_json(&json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse catalog JSON: {}", e)))
        }
        None => api_client()
            .fetch_endpoints()
            .await
            .unwrap_or_else(|e| exit_with_error(&e.to_string())),
    }
}

async fn load_project(path: &str) -> Project {
    Project::load(path)
        .await
        .unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

async fn print_schemas(catalog: Option<String>, endpoint: Option<String>) {
    let catalog = load_catalog(catalog).await;
    let endpoints: Vec<&Endpoint> = match &endpoint {
        Some(id) => match catalog.get(id) {
            Some(e) => vec![e],
            None => exit_with_error(&format!("Endpoint '{}' not found in the catalog", id)),
        },
        None => catalog.iter().collect(),
    };

    for endpoint in endpoints {
        let schema = infer_schema(endpoint);
        let json = serde_json::to_string_pretty(&schema)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize schema: {}", e)));
        println!("# {} ({})", endpoint.title, endpoint.id);
        println!("{}\n", json);
    }
}

async fn save_snapshot(output: &str) {
    let client = api_client();
    let catalog = client
        .fetch_endpoints()
        .await
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    CatalogSnapshot::new(&client.config().api_url, &catalog)
        .save(output)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    println!("Saved {} endpoints to '{}'", catalog.len(), output);
}

async fn validate_project(path: &str) {
    let project = load_project(path).await;
    let graph = project
        .graph()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    println!("Project '{}' ({})", project.name, project.id);
    println!("  Nodes: {}", graph.nodes.len());
    println!("  Edges: {}", graph.edges.len());

    let mut rejected = 0;
    for edge in &graph.edges {
        let Some((source, target)) = connection_types(&edge.connection(), &graph.nodes) else {
            continue;
        };
        if are_types_compatible(source, target) {
            println!("  ok   {} [{} -> {}] {}", edge.id, source, target, graph.edge_color(edge));
        } else {
            rejected += 1;
            println!("  FAIL {} [{} -> {}]", edge.id, source, target);
        }
    }

    if rejected > 0 {
        exit_with_error(&format!("{} incompatible connection(s)", rejected));
    }
    println!("\nAll connections are valid.");
}

async fn package_node(path: &str, node_id: &str) {
    let project = load_project(path).await;
    let graph = project
        .graph()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let node = graph
        .node(node_id)
        .unwrap_or_else(|| exit_with_error(&format!("Node '{}' not found", node_id)));
    let NodeKind::AiEndpoint(data) = &node.kind else {
        exit_with_error(&format!("Node '{}' is not an AI endpoint node", node_id));
    };

    let schema = infer_schema(&data.endpoint);
    let connected = gather_connected_values(&graph, node_id, &schema);
    let resolved = resolve_connected_parameters(&data.parameters, &connected);
    match package_parameters(&resolved, &schema.inputs).await {
        Ok(payload) => {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to serialize payload: {}", e)));
            println!("{}", json);
        }
        Err(errors) => {
            for error in errors.errors() {
                eprintln!("  - {}", error);
            }
            exit_with_error(&format!("{} parameter(s) failed to package", errors.len()));
        }
    }
}

async fn run_node(path: &str, node_id: &str, output: Option<String>) {
    let project = load_project(path).await;
    let graph = project
        .graph()
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    let store = GraphStore::with_state(graph);
    let client = api_client();

    let start = Instant::now();
    let outcome = execute_node(&store, &client, node_id).await;
    let duration = start.elapsed();

    let snapshot = store.snapshot();
    let updated = Project {
        nodes: snapshot.nodes.clone(),
        edges: snapshot.edges.clone(),
        ..project
    };
    let output = output.unwrap_or_else(|| path.to_string());
    updated
        .save(&output)
        .await
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    match outcome {
        Ok(result) => {
            println!("Execution finished in {:?}", duration);
            println!("{}", serde_json::to_string_pretty(&result).unwrap_or_default());
        }
        Err(e) => exit_with_error(&format!("Execution failed: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
