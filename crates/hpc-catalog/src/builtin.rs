//! Built-in catalog entries

use crate::definition::{Category, Choice, ComponentDefinition, OptionSpec};

pub(crate) fn definitions() -> Vec<ComponentDefinition> {
    vec![
        ComponentDefinition::new("c2-standard-8", "C2 Standard 8", Category::Compute)
            .with_description("General-purpose machine with a balance of price and performance.")
            .with_cost(0.33, "vCPU/hr")
            .with_option(
                OptionSpec::slider("cpuCount", "vCPUs", 8.0, 2.0, 60.0, 2.0)
                    .with_description("Number of virtual CPUs."),
            )
            .with_option(
                OptionSpec::slider("memory", "Memory", 32.0, 8.0, 240.0, 4.0)
                    .with_unit("GB")
                    .with_description("Amount of RAM."),
            )
            .with_option(
                OptionSpec::select(
                    "os",
                    "Operating System",
                    "debian-11",
                    vec![
                        Choice::new("debian-11", "Debian 11"),
                        Choice::new("ubuntu-2204", "Ubuntu 22.04 LTS"),
                        Choice::new("centos-stream-9", "CentOS Stream 9"),
                    ],
                )
                .with_description("The base operating system for the instance."),
            ),
        ComponentDefinition::new("a2-highgpu-1g", "A2 High-GPU 1G", Category::Compute)
            .with_description("Optimized for ML/AI with NVIDIA A100 GPUs.")
            .with_cost(3.75, "GPU/hr")
            .with_option(
                OptionSpec::select(
                    "gpuCount",
                    "A100 GPUs",
                    "1",
                    vec![
                        Choice::new("1", "1 GPU"),
                        Choice::new("2", "2 GPUs"),
                        Choice::new("4", "4 GPUs"),
                        Choice::new("8", "8 GPUs"),
                        Choice::new("16", "16 GPUs"),
                    ],
                )
                .with_description("Number of NVIDIA A100 GPUs."),
            )
            .with_option(
                OptionSpec::select(
                    "cpuCount",
                    "vCPUs",
                    "12",
                    vec![
                        Choice::new("12", "12 vCPUs"),
                        Choice::new("24", "24 vCPUs"),
                        Choice::new("48", "48 vCPUs"),
                        Choice::new("96", "96 vCPUs"),
                    ],
                )
                .with_description("Number of virtual CPUs."),
            )
            .with_option(
                OptionSpec::select(
                    "memory",
                    "Memory",
                    "85",
                    vec![
                        Choice::new("85", "85 GB"),
                        Choice::new("170", "170 GB"),
                        Choice::new("340", "340 GB"),
                        Choice::new("680", "680 GB"),
                    ],
                )
                .with_unit("GB")
                .with_description("Amount of RAM."),
            ),
        ComponentDefinition::new("persistent-ssd", "Persistent SSD", Category::Storage)
            .with_description("High-performance block storage.")
            .with_cost(0.17, "GB/mo")
            .with_option(
                OptionSpec::slider("size", "Disk Size", 500.0, 10.0, 65536.0, 10.0)
                    .with_unit("GB")
                    .with_description("Size of the persistent disk."),
            )
            .with_option(
                OptionSpec::number("readIOPS", "Read IOPS", 15000.0)
                    .with_description("Maximum read operations per second."),
            )
            .with_option(
                OptionSpec::number("writeIOPS", "Write IOPS", 15000.0)
                    .with_description("Maximum write operations per second."),
            ),
        ComponentDefinition::new("hyperdisk-balanced", "Hyperdisk Balanced", Category::Storage)
            .with_description("Cost-effective, high-performance block storage.")
            .with_cost(0.10, "GB/mo")
            .with_option(
                OptionSpec::slider("size", "Disk Size", 1024.0, 10.0, 65536.0, 10.0)
                    .with_unit("GB")
                    .with_description("Size of the Hyperdisk."),
            )
            .with_option(
                OptionSpec::slider("iops", "IOPS", 5000.0, 1000.0, 160_000.0, 1000.0)
                    .with_description("Provisioned IOPS."),
            )
            .with_option(
                OptionSpec::slider("throughput", "Throughput", 250.0, 140.0, 2400.0, 10.0)
                    .with_unit("MB/s")
                    .with_description("Provisioned throughput."),
            ),
        ComponentDefinition::new("vpc-network", "VPC Network", Category::Network)
            .with_description("Virtual Private Cloud for secure networking.")
            .with_cost(0.01, "GB egress")
            .with_option(
                OptionSpec::text("name", "Network Name", "hpc-network")
                    .with_description("Name for the VPC network."),
            )
            .with_option(
                OptionSpec::select(
                    "routingMode",
                    "Routing Mode",
                    "REGIONAL",
                    vec![
                        Choice::new("REGIONAL", "Regional"),
                        Choice::new("GLOBAL", "Global"),
                    ],
                )
                .with_description("Dynamic routing mode for the VPC."),
            )
            .with_option(
                OptionSpec::number("mtu", "MTU", 1460.0)
                    .with_description("Maximum transmission unit for the network."),
            ),
    ]
}
