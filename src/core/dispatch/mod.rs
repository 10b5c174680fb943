//! Per-resource pricing dispatcher
//!
//! Dispatch order is an explicit contract: free-resource table first (many
//! free resources carry no size hint), then the special-formula handlers,
//! then the generic instance lookup with its three-tier fallback chain
//! (bulk index, remote client, static table). Every attempt returns a
//! [`PricingOutcome`], so a failure while pricing one resource can never
//! abort the batch.

mod fallback;
mod formulas;
mod free;

pub use free::{free_resource, free_resource_count, FreeResource};

use crate::config::HOURS_PER_MONTH;
use crate::core::types::{CloudProvider, Confidence, CostLineItem, ResourceSpec};
use crate::pricing::{AwsPricingClient, AzurePricingClient, BulkPricingIndex, GcpPricingClient};
use crate::utils::error::EngineError;
use formulas::FormulaCtx;
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of one pricing attempt
#[derive(Debug, Clone)]
pub enum PricingOutcome {
    Priced(CostLineItem),
    Unpriced { reason: String },
}

impl PricingOutcome {
    pub fn unpriced(reason: impl Into<String>) -> Self {
        Self::Unpriced {
            reason: reason.into(),
        }
    }
}

/// Prices one resource at a time against the configured pricing sources
#[derive(Debug, Default)]
pub struct PricingDispatcher {
    bulk: Option<Arc<BulkPricingIndex>>,
    aws: Option<Arc<AwsPricingClient>>,
    azure: Option<Arc<AzurePricingClient>>,
    gcp: Option<Arc<GcpPricingClient>>,
}

impl PricingDispatcher {
    pub fn new(
        bulk: Option<Arc<BulkPricingIndex>>,
        aws: Option<Arc<AwsPricingClient>>,
        azure: Option<Arc<AzurePricingClient>>,
        gcp: Option<Arc<GcpPricingClient>>,
    ) -> Self {
        Self {
            bulk,
            aws,
            azure,
            gcp,
        }
    }

    /// Price a single resource with its resolved region and count.
    /// `assumptions` carries the resolver's notes and is extended in place.
    pub async fn price_resource(
        &self,
        resource: &ResourceSpec,
        region: &str,
        count: i64,
        assumptions: Vec<String>,
    ) -> PricingOutcome {
        match resource.cloud {
            CloudProvider::Aws => self.price_aws(resource, region, count, assumptions).await,
            CloudProvider::Azure => self.price_azure(resource, region, count, assumptions).await,
            CloudProvider::Gcp => self.price_gcp(resource, region).await,
            CloudProvider::Unknown => PricingOutcome::unpriced(format!(
                "Cloud provider '{}' not supported for pricing",
                resource.cloud
            )),
        }
    }

    async fn price_aws(
        &self,
        resource: &ResourceSpec,
        region: &str,
        count: i64,
        mut assumptions: Vec<String>,
    ) -> PricingOutcome {
        let terraform_type = resource.terraform_type.as_str();
        let service = resource.service.as_str();

        // 1. free-resource shortcut, before any instance-type inference
        if let Some(free) = free_resource(terraform_type) {
            assumptions.push(free.reason.to_string());
            return PricingOutcome::Priced(CostLineItem {
                cloud: CloudProvider::Aws,
                service: free.service.to_string(),
                resource_name: resource.name.clone(),
                terraform_type: resource.terraform_type.clone(),
                region: region.to_string(),
                monthly_cost_usd: 0.0,
                pricing_unit: "month".to_string(),
                assumptions,
                priced: true,
                confidence: Confidence::High,
            });
        }

        // 2. special-formula resources
        let ctx = FormulaCtx {
            resource,
            region,
            count,
        };

        if is_lambda_resource(terraform_type, service) {
            return PricingOutcome::Priced(formulas::price_lambda(&ctx, assumptions));
        }
        if is_s3_resource(terraform_type, service) {
            return PricingOutcome::Priced(formulas::price_s3(&ctx, assumptions));
        }

        match terraform_type {
            "aws_nat_gateway" => {
                return PricingOutcome::Priced(formulas::price_nat_gateway(&ctx, assumptions));
            }
            "aws_lb" => {
                let service_lower = service.to_lowercase();
                let item = if service_lower == "nlb" || service_lower == "network load balancer" {
                    formulas::price_nlb(&ctx, assumptions)
                } else {
                    formulas::price_alb(&ctx, assumptions)
                };
                return PricingOutcome::Priced(item);
            }
            "aws_autoscaling_group" => {
                return self
                    .price_autoscaling_group(resource, region, assumptions)
                    .await;
            }
            "aws_vpc_endpoint" => {
                let service_lower = service.to_lowercase();
                if service_lower == "vpc" || service_lower == "endpoint" {
                    return PricingOutcome::Priced(formulas::price_vpc_endpoint(&ctx, assumptions));
                }
            }
            "aws_ebs_volume" => {
                return PricingOutcome::Priced(formulas::price_ebs_volume(&ctx, assumptions));
            }
            "aws_efs_file_system" => {
                return PricingOutcome::Priced(formulas::price_efs(&ctx, assumptions));
            }
            "aws_elasticache_cluster" | "aws_elasticache_replication_group" => {
                return self.price_elasticache(resource, region, count, assumptions).await;
            }
            "aws_api_gateway_rest_api" => {
                return PricingOutcome::Priced(formulas::price_api_gateway(&ctx, assumptions));
            }
            "aws_cloudfront_distribution" => {
                return PricingOutcome::Priced(formulas::price_cloudfront(&ctx, assumptions));
            }
            "aws_ec2_transit_gateway" => {
                return PricingOutcome::Priced(formulas::price_transit_gateway(&ctx, assumptions));
            }
            "aws_ecs_service" => {
                let item = if resource.size.launch_type.as_deref() == Some("FARGATE") {
                    formulas::price_fargate_service(&ctx, assumptions)
                } else {
                    formulas::price_ecs_service_free(&ctx, assumptions)
                };
                return PricingOutcome::Priced(item);
            }
            "aws_sns_topic" => {
                return PricingOutcome::Priced(formulas::price_sns_topic(&ctx, assumptions));
            }
            "aws_sqs_queue" => {
                return PricingOutcome::Priced(formulas::price_sqs_queue(&ctx, assumptions));
            }
            _ => {}
        }

        // 3. generic instance lookup
        self.price_aws_generic(resource, region, count, assumptions)
            .await
    }

    /// ASG is a free management service; when the launch-template instance
    /// type is known, cost is attributed to the minimum running count.
    async fn price_autoscaling_group(
        &self,
        resource: &ResourceSpec,
        region: &str,
        mut assumptions: Vec<String>,
    ) -> PricingOutcome {
        let min_size = resource.count_model.min.unwrap_or(1.0);
        let max_size = resource.count_model.max.unwrap_or(1.0);
        let desired = resource.count_model.desired.unwrap_or(min_size);

        assumptions.push(
            "ASG is a free management service - cost comes from managed EC2 instances".to_string(),
        );
        assumptions.push(format!(
            "ASG configuration: min={min_size}, max={max_size}, desired={desired}"
        ));

        if let Some(instance_type) = resource.size.instance_type.as_deref() {
            if let Some(hourly_price) = self
                .ec2_chain_price(instance_type, region, &mut assumptions)
                .await
            {
                let instances_running = min_size;
                let monthly_cost = hourly_price * HOURS_PER_MONTH * instances_running;

                assumptions.push(format!(
                    "If ASG is not triggered: {instances_running} instance(s) running at min capacity"
                ));
                assumptions.push(format!(
                    "Instance type: {instance_type} @ ${hourly_price:.4}/hour"
                ));
                assumptions.push(format!(
                    "Cost: {instances_running} × ${hourly_price:.4}/hour × 730 hours = ${monthly_cost:.2}/month"
                ));
                assumptions.push(
                    "Note: If ASG scales up, cost increases based on actual instance count"
                        .to_string(),
                );

                return PricingOutcome::Priced(CostLineItem {
                    cloud: CloudProvider::Aws,
                    service: "EC2".to_string(),
                    resource_name: resource.name.clone(),
                    terraform_type: resource.terraform_type.clone(),
                    region: region.to_string(),
                    monthly_cost_usd: monthly_cost,
                    pricing_unit: "month".to_string(),
                    assumptions,
                    priced: true,
                    confidence: Confidence::Medium,
                });
            }
        }

        assumptions.push(
            "Note: ASG cost = cost of managed EC2 instances (priced separately via launch template)"
                .to_string(),
        );
        assumptions.push(format!(
            "If ASG is not triggered, cost is based on {min_size} minimum instance(s)"
        ));
        assumptions.push(
            "Actual cost depends on instance types in launch template/configuration".to_string(),
        );

        PricingOutcome::Priced(CostLineItem {
            cloud: CloudProvider::Aws,
            service: "EC2".to_string(),
            resource_name: resource.name.clone(),
            terraform_type: resource.terraform_type.clone(),
            region: region.to_string(),
            monthly_cost_usd: 0.0,
            pricing_unit: "month".to_string(),
            assumptions,
            priced: true,
            confidence: Confidence::Low,
        })
    }

    /// Cache clusters approximate node cost via the EC2 instance-price chain,
    /// scaled by replica count.
    async fn price_elasticache(
        &self,
        resource: &ResourceSpec,
        region: &str,
        count: i64,
        mut assumptions: Vec<String>,
    ) -> PricingOutcome {
        if let Some(node_type) = resource.size.cache_node_hint() {
            let node_type = node_type.to_string();
            if let Some(hourly_price) = self
                .ec2_chain_price(&node_type, region, &mut assumptions)
                .await
            {
                let node_count = count;
                let monthly_cost = hourly_price * HOURS_PER_MONTH * node_count as f64;

                assumptions.push(format!("ElastiCache node type: {node_type}"));
                assumptions.push(format!("Node count: {node_count}"));
                assumptions.push(format!(
                    "Cost: {node_count} × ${hourly_price:.4}/hour × 730 hours = ${monthly_cost:.2}/month"
                ));
                assumptions.push(
                    "Note: Using EC2 pricing as approximation - ElastiCache pricing may vary slightly"
                        .to_string(),
                );
                assumptions.push(
                    "Note: Data transfer costs may apply for cross-AZ or internet traffic"
                        .to_string(),
                );

                return PricingOutcome::Priced(CostLineItem {
                    cloud: CloudProvider::Aws,
                    service: "ElastiCache".to_string(),
                    resource_name: resource.name.clone(),
                    terraform_type: resource.terraform_type.clone(),
                    region: region.to_string(),
                    monthly_cost_usd: monthly_cost,
                    pricing_unit: "month".to_string(),
                    assumptions,
                    priced: true,
                    confidence: Confidence::Medium,
                });
            }
        }

        assumptions.push(
            "Note: ElastiCache cost = node cost (priced separately) + data transfer".to_string(),
        );
        assumptions.push(
            "Common node types: cache.t3.micro (~$0.017/hour), cache.t3.small (~$0.034/hour)"
                .to_string(),
        );
        assumptions.push(
            "Actual cost depends on node type and count - check ElastiCache pricing for exact costs"
                .to_string(),
        );

        PricingOutcome::Priced(CostLineItem {
            cloud: CloudProvider::Aws,
            service: "ElastiCache".to_string(),
            resource_name: resource.name.clone(),
            terraform_type: resource.terraform_type.clone(),
            region: region.to_string(),
            monthly_cost_usd: 0.0,
            pricing_unit: "month".to_string(),
            assumptions,
            priced: true,
            confidence: Confidence::Low,
        })
    }

    async fn price_aws_generic(
        &self,
        resource: &ResourceSpec,
        region: &str,
        count: i64,
        mut assumptions: Vec<String>,
    ) -> PricingOutcome {
        let instance_type = match resource.size.instance_hint() {
            Some(hint) => hint.to_string(),
            None => {
                // some resources legitimately have no instance type
                debug!(
                    resource = %resource.name,
                    terraform_type = %resource.terraform_type,
                    service = %resource.service,
                    "no instance type/SKU hint"
                );
                return PricingOutcome::unpriced("No instance type/SKU found");
            }
        };

        let hours_per_month = resource.usage.hours_per_month_or(HOURS_PER_MONTH);
        assumptions.push(format!("{hours_per_month} hours/month"));
        let confidence = resource.count_model.confidence;

        let is_ec2 =
            resource.service.contains("EC2") || resource.terraform_type == "aws_instance";
        let is_rds =
            resource.service.contains("RDS") || resource.terraform_type.starts_with("aws_db");

        let hourly_price = if is_ec2 {
            self.ec2_chain_price(&instance_type, region, &mut assumptions)
                .await
        } else if is_rds {
            let engine = resource.size.engine_or_default().to_string();
            self.rds_chain_price(&instance_type, region, &engine, &mut assumptions)
                .await
        } else {
            None
        };

        match hourly_price {
            Some(hourly_price) => {
                let monthly_cost = hourly_price * hours_per_month * count as f64;
                assumptions.push(format!("${hourly_price:.4}/hour × {count} instances"));

                PricingOutcome::Priced(CostLineItem {
                    cloud: CloudProvider::Aws,
                    service: resource.service.clone(),
                    resource_name: resource.name.clone(),
                    terraform_type: resource.terraform_type.clone(),
                    region: region.to_string(),
                    monthly_cost_usd: monthly_cost,
                    pricing_unit: "hour".to_string(),
                    assumptions,
                    priced: true,
                    confidence,
                })
            }
            None => PricingOutcome::unpriced("Pricing not available for this resource type"),
        }
    }

    /// EC2 price chain: bulk index, remote client, static table. Remote
    /// failures are logged and fall through; they never abort the resource.
    async fn ec2_chain_price(
        &self,
        instance_type: &str,
        region: &str,
        assumptions: &mut Vec<String>,
    ) -> Option<f64> {
        if let Some(bulk) = &self.bulk {
            if let Some(price) = bulk.ec2_instance_price(instance_type, region, None) {
                return Some(price);
            }
        }

        if let Some(client) = &self.aws {
            match client
                .get_ec2_instance_price(instance_type, region, None)
                .await
            {
                Ok(Some(price)) => return Some(price),
                Ok(None) => {}
                Err(err) => log_chain_failure("EC2", instance_type, &err),
            }
        }

        fallback::fallback_ec2_price(instance_type).map(|(price, note)| {
            assumptions.push(note);
            price
        })
    }

    /// RDS price chain, same tiers as EC2.
    async fn rds_chain_price(
        &self,
        instance_type: &str,
        region: &str,
        engine: &str,
        assumptions: &mut Vec<String>,
    ) -> Option<f64> {
        if let Some(bulk) = &self.bulk {
            if let Some(price) = bulk.rds_instance_price(instance_type, region, Some(engine)) {
                return Some(price);
            }
        }

        if let Some(client) = &self.aws {
            match client
                .get_rds_instance_price(instance_type, region, Some(engine))
                .await
            {
                Ok(Some(price)) => return Some(price),
                Ok(None) => {}
                Err(err) => log_chain_failure("RDS", instance_type, &err),
            }
        }

        fallback::fallback_rds_price(instance_type).map(|(price, note)| {
            assumptions.push(note);
            price
        })
    }

    async fn price_azure(
        &self,
        resource: &ResourceSpec,
        region: &str,
        count: i64,
        mut assumptions: Vec<String>,
    ) -> PricingOutcome {
        let sku_name = match resource.size.sku_hint() {
            Some(sku) => sku.to_string(),
            None => return PricingOutcome::unpriced("No instance type/SKU found"),
        };

        let client = match &self.azure {
            Some(client) => client,
            None => {
                return PricingOutcome::unpriced("Pricing not available for this resource type")
            }
        };

        let hours_per_month = resource.usage.hours_per_month_or(HOURS_PER_MONTH);
        assumptions.push(format!("{hours_per_month} hours/month"));

        match client
            .get_virtual_machine_price(&sku_name, region, None)
            .await
        {
            Ok(Some(hourly_price)) => {
                let monthly_cost = hourly_price * hours_per_month * count as f64;
                assumptions.push(format!("${hourly_price:.4}/hour × {count} instances"));

                PricingOutcome::Priced(CostLineItem {
                    cloud: CloudProvider::Azure,
                    service: resource.service.clone(),
                    resource_name: resource.name.clone(),
                    terraform_type: resource.terraform_type.clone(),
                    region: region.to_string(),
                    monthly_cost_usd: monthly_cost,
                    pricing_unit: "hour".to_string(),
                    assumptions,
                    priced: true,
                    confidence: resource.count_model.confidence,
                })
            }
            Ok(None) => PricingOutcome::unpriced("Pricing not available for this resource type"),
            Err(err) => {
                warn!(resource = %resource.name, %err, "failed to price Azure resource");
                PricingOutcome::unpriced(format!("Pricing lookup failed: {err}"))
            }
        }
    }

    /// GCP pricing is a placeholder: the client is consulted (it records
    /// success and returns nothing) and the resource is reported unpriced.
    async fn price_gcp(&self, resource: &ResourceSpec, region: &str) -> PricingOutcome {
        if let Some(client) = &self.gcp {
            if let Some(machine_type) = resource.size.instance_hint() {
                let _ = client.get_compute_instance_price(machine_type, region).await;
            }
        }
        PricingOutcome::unpriced("GCP pricing not fully implemented")
    }
}

fn is_lambda_resource(terraform_type: &str, service: &str) -> bool {
    terraform_type == "aws_lambda_function"
        || terraform_type.starts_with("aws_lambda_")
        || service.to_uppercase().contains("LAMBDA")
        || terraform_type.to_lowercase().contains("lambda")
}

fn is_s3_resource(terraform_type: &str, service: &str) -> bool {
    terraform_type == "aws_s3_bucket"
        || terraform_type.starts_with("aws_s3_")
        || service.to_uppercase().contains("S3")
        || terraform_type.to_lowercase().contains("s3")
}

fn log_chain_failure(kind: &str, instance_type: &str, err: &EngineError) {
    warn!(kind, instance_type, %err, "remote pricing lookup failed, falling through");
}
