//! Solidity bindings for the DAO contracts touched by omnibus actions.
//!
//! Only the events and calls the action catalog and the event checker rely on are bound.

use alloy_sol_types::sol;

sol! {
    /// Aragon voting app.
    #[sol(all_derives)]
    interface IVoting {
        /// Emitted when a new vote is created.
        event StartVote(uint256 indexed voteId, address indexed creator, string metadata);
        /// Emitted when a vote is cast.
        event CastVote(uint256 indexed voteId, address indexed voter, bool supports, uint256 stake);
        /// Emitted when a passed vote is executed.
        event ExecuteVote(uint256 indexed voteId);
        /// Emitted by the EVM script runner once the execution script has been run.
        event ScriptResult(address indexed executor, bytes script, bytes input, bytes returnData);

        /// Creates a new vote carrying the given execution script.
        function newVote(bytes _executionScript, string _metadata) external returns (uint256 voteId);
        /// Executes a passed vote.
        function executeVote(uint256 _voteId) external;
    }

    /// Aragon agent app.
    #[sol(all_derives)]
    interface IAgent {
        /// Emitted by the EVM script runner once a forwarded script has been run.
        event ScriptResult(address indexed executor, bytes script, bytes input, bytes returnData);
        /// Emitted on a direct `execute` call.
        event Execute(address indexed sender, address indexed target, uint256 ethValue, bytes data);
        /// Emitted when the vault transfers tokens out.
        event VaultTransfer(address indexed token, address indexed to, uint256 amount);

        /// Runs an EVM script in the context of the agent.
        function forward(bytes _evmScript) external;
    }

    /// Aragon `CallsScript` executor.
    #[sol(all_derives)]
    interface ICallsScript {
        /// Emitted for every call the executor performs.
        event LogScriptCall(address indexed sender, address indexed src, address indexed dst);
    }

    /// Aragon finance app.
    #[sol(all_derives)]
    interface IFinance {
        /// Emitted when a transaction is recorded.
        event NewTransaction(uint256 indexed transactionId, bool incoming, address indexed entity, uint256 amount, string reference);

        /// Pays `_amount` of `_token` to `_receiver` immediately.
        function newImmediatePayment(address _token, address _receiver, uint256 _amount, string _reference) external;
    }

    /// Node operators registry staking module.
    #[sol(all_derives)]
    interface INodeOperatorsRegistry {
        /// Emitted when a node operator is registered.
        event NodeOperatorAdded(uint256 nodeOperatorId, string name, address rewardAddress, uint64 stakingLimit);

        /// Registers a new node operator.
        function addNodeOperator(string _name, address _rewardAddress) external returns (uint256 id);
    }

    /// ERC-20 token.
    #[sol(all_derives)]
    interface IERC20 {
        /// Emitted on token transfers.
        event Transfer(address indexed from, address indexed to, uint256 value);
        /// Emitted on allowance changes.
        event Approval(address indexed owner, address indexed spender, uint256 value);

        /// Returns the token balance of `account`.
        function balanceOf(address account) external view returns (uint256 balance);
    }

    /// OpenZeppelin access control.
    #[sol(all_derives)]
    interface IAccessControl {
        /// Emitted when `account` is granted `role`.
        event RoleGranted(bytes32 indexed role, address indexed account, address indexed sender);
        /// Emitted when `account` is revoked `role`.
        event RoleRevoked(bytes32 indexed role, address indexed account, address indexed sender);

        /// Revokes `role` from `account`.
        function revokeRole(bytes32 role, address account) external;
        /// Returns `true` if `account` has been granted `role`.
        function hasRole(bytes32 role, address account) external view returns (bool granted);
    }
}
