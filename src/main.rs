// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::Parser;
use flotta_kube::cli::commands::{
    AddCommands, Commands, DeleteCommands, ListCommands, StartCommands, StatusCommands,
    StopCommands,
};
use flotta_kube::cli::CliArgs;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let args = CliArgs::parse();

    match args.command {
        Commands::Add(AddCommands::Device(cmd)) => cmd.execute().await,
        Commands::Add(AddCommands::Workload(cmd)) => cmd.execute().await,
        Commands::Delete(DeleteCommands::Device(cmd)) => cmd.execute().await,
        Commands::Delete(DeleteCommands::Workload(cmd)) => cmd.execute().await,
        Commands::Start(StartCommands::Device(cmd)) => cmd.execute().await,
        Commands::Stop(StopCommands::Device(cmd)) => cmd.execute().await,
        Commands::List(ListCommands::Devices(cmd)) => cmd.execute().await,
        Commands::List(ListCommands::Workloads(cmd)) => cmd.execute().await,
        Commands::Status(StatusCommands::Device(cmd)) => cmd.execute().await,
        Commands::Status(StatusCommands::Workload(cmd)) => cmd.execute().await,
    }
}
